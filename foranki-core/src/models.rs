use serde::{Deserialize, Deserializer, Serialize};

/// Server-assigned card identifier (an Anki note id).
pub type CardId = i64;

/// Message shown by the generate action when the server gives no detail.
pub const GENERATE_FAILED: &str = "Failed to generate content";
pub const MODIFY_FAILED: &str = "Failed to modify content";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    pub front: String,
    pub back: String,
    #[serde(default)]
    pub deck_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
}

impl Card {
    pub fn new(
        id: CardId,
        front: impl Into<String>,
        back: impl Into<String>,
        deck_name: impl Into<String>,
    ) -> Self {
        Self {
            id,
            front: front.into(),
            back: back.into(),
            deck_name: deck_name.into(),
            tags: Vec::new(),
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Body of `POST /cards`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewCard {
    pub front: String,
    pub back: String,
    pub deck_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl NewCard {
    pub fn new(front: impl Into<String>, back: impl Into<String>, deck_name: impl Into<String>) -> Self {
        Self {
            front: front.into(),
            back: back.into(),
            deck_name: deck_name.into(),
            tags: None,
        }
    }
}

/// Body of `PUT /cards/{id}`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CardUpdate {
    pub front: String,
    pub back: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Create responses are only required to carry the new id; the server
/// may answer with the full card or with `{id, message}`.
#[derive(Clone, Debug, Deserialize)]
pub struct Created {
    pub id: CardId,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenerateRequest {
    pub prompt: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Generation {
    pub chat: String,
    pub front: String,
    pub back: String,
}

impl Generation {
    /// Both sides must be present for the result to prefill a new card.
    pub fn has_card(&self) -> bool {
        !self.front.is_empty() && !self.back.is_empty()
    }
}

/// Wire shape of `/generate`, including the older `{content}` answer.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum GenerateResponse {
    Legacy {
        content: String,
    },
    Current {
        chat: String,
        #[serde(default)]
        front: String,
        #[serde(default)]
        back: String,
    },
}

impl From<GenerateResponse> for Generation {
    fn from(r: GenerateResponse) -> Self {
        match r {
            GenerateResponse::Legacy { content } => Generation {
                chat: content,
                front: String::new(),
                back: String::new(),
            },
            GenerateResponse::Current { chat, front, back } => Generation { chat, front, back },
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModifyRequest {
    pub front: String,
    pub back: String,
    pub instruction: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Modified {
    pub front: String,
    pub back: String,
}

impl Modified {
    /// An empty side would blank the card if saved.
    pub fn is_complete(&self) -> bool {
        !self.front.is_empty() && !self.back.is_empty()
    }
}

fn null_as_empty<'de, D>(de: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(de)?.unwrap_or_default())
}
