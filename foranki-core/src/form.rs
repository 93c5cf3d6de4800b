use crate::{Card, CardId, CoreError, NewCard};

/// Split a comma-separated tag field into trimmed, non-empty tags.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn format_tags(tags: &[String]) -> String {
    tags.join(", ")
}

/// State of the "add new card" form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CardDraft {
    pub front: String,
    pub back: String,
    pub deck_name: String,
}

impl CardDraft {
    pub fn new(front: impl Into<String>, back: impl Into<String>, deck_name: impl Into<String>) -> Self {
        Self {
            front: front.into(),
            back: back.into(),
            deck_name: deck_name.into(),
        }
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.front.is_empty() {
            return Err(CoreError::Invalid("front is empty"));
        }
        if self.back.is_empty() {
            return Err(CoreError::Invalid("back is empty"));
        }
        Ok(())
    }

    /// Validates and hands back the request body, clearing front and back.
    /// The deck name stays for the next card.
    pub fn submit(&mut self) -> Result<NewCard, CoreError> {
        self.validate()?;
        let card = NewCard::new(
            std::mem::take(&mut self.front),
            std::mem::take(&mut self.back),
            self.deck_name.clone(),
        );
        Ok(card)
    }
}

/// Editable copy of an existing card; tags are edited as one text field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardEdit {
    pub id: CardId,
    pub front: String,
    pub back: String,
    pub tags: String,
    original: Card,
}

impl CardEdit {
    pub fn from_card(card: &Card) -> Self {
        Self {
            id: card.id,
            front: card.front.clone(),
            back: card.back.clone(),
            tags: format_tags(&card.tags),
            original: card.clone(),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::from_card(&self.original);
    }

    pub fn is_dirty(&self) -> bool {
        *self != Self::from_card(&self.original)
    }

    /// Arguments for `CardStore::update`: front, back and the parsed tags.
    pub fn to_update(&self) -> (String, String, Vec<String>) {
        (self.front.clone(), self.back.clone(), parse_tags(&self.tags))
    }
}
