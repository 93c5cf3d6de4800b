use crate::cli::opts::*;

use anyhow::{anyhow, bail, Result};
use foranki_core::assist::{self, AssistOutcome};
use foranki_core::{
    all_tags, filter_by_deck, filter_by_tags, Card, CardDraft, CardEdit, CardStore, Modified,
    TagSelection,
};
use foranki_http::{ApiConfig, HttpService};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

pub fn connect(api_url: &str) -> Result<Arc<HttpService>> {
    let config = ApiConfig::new(api_url);
    info!(base_url = %config.base_url, "using card api");
    Ok(Arc::new(HttpService::new(config)?))
}

pub async fn run_cli(args: Cli) -> Result<()> {
    let http = connect(&args.api_url)?;
    let store = CardStore::new(http.clone());
    match args.cmd {
        Command::Cards(cmd) => cards_cmd(&store, cmd).await,
        Command::Generate(cmd) => generate_cmd(&http, &store, cmd).await,
        Command::Modify(cmd) => modify_cmd(&http, &store, cmd).await,
        Command::Export(cmd) => export_cmd(&store, cmd).await,
        Command::Tui => unreachable!("the terminal UI is started from main"),
    }
}

async fn cards_cmd(store: &CardStore, cmd: CardsCmd) -> Result<()> {
    match cmd {
        CardsCmd::List(filter) => {
            let cards = select(&load(store).await?, &filter);
            for c in &cards {
                println!("{}", card_line(c));
            }
            if cards.is_empty() {
                println!("no cards found");
            }
        }
        CardsCmd::Tags => {
            for t in all_tags(&load(store).await?) {
                println!("{t}");
            }
        }
        CardsCmd::Add(a) => {
            let mut draft = CardDraft::new(a.front, a.back, a.deck);
            let mut card = draft.submit()?;
            if !a.tags.is_empty() {
                card.tags = Some(a.tags);
            }
            match store.add_card(card).await {
                Some(id) => println!("{id}"),
                None => bail!("card was not created"),
            }
        }
        CardsCmd::Edit(e) => {
            let card = find(store, e.card_id).await?;
            let mut edit = CardEdit::from_card(&card);
            if let Some(f) = e.front {
                edit.front = f;
            }
            if let Some(b) = e.back {
                edit.back = b;
            }
            if let Some(t) = e.tags {
                edit.tags = t;
            }
            if !edit.is_dirty() {
                println!("nothing to change");
                return Ok(());
            }
            let (front, back, tags) = edit.to_update();
            if !store.update(card.id, &front, &back, Some(tags)).await {
                bail!("card {} was not updated", card.id);
            }
            println!("ok");
        }
        CardsCmd::Rm { card_id } => {
            if !store.remove(card_id).await {
                bail!("card {card_id} was not deleted");
            }
            println!("ok");
        }
    }
    Ok(())
}

async fn generate_cmd(http: &HttpService, store: &CardStore, cmd: GenerateCmd) -> Result<()> {
    let generation = match assist::generate(http, &cmd.prompt).await {
        AssistOutcome::Done(g) => g,
        AssistOutcome::Skipped => bail!("prompt is empty"),
        AssistOutcome::Failed(msg) => bail!(msg),
    };
    println!("{}", generation.chat);
    if generation.has_card() {
        println!("\nQ: {}\nA: {}", generation.front, generation.back);
    }

    if cmd.add {
        let mut draft = assist::draft_from(&generation, &cmd.deck)
            .ok_or_else(|| anyhow!("the answer has no card to add"))?;
        match store.add_card(draft.submit()?).await {
            Some(id) => println!("added {id}"),
            None => bail!("card was not created"),
        }
    }
    Ok(())
}

async fn modify_cmd(http: &HttpService, store: &CardStore, cmd: ModifyCmd) -> Result<()> {
    let card = find(store, cmd.card_id).await?;
    let modified = match assist::modify(http, &card.front, &card.back, &cmd.instruction).await {
        AssistOutcome::Done(m) => m,
        AssistOutcome::Skipped => bail!("instruction is empty"),
        AssistOutcome::Failed(msg) => bail!(msg),
    };
    println!("Q: {}\nA: {}", modified.front, modified.back);

    if cmd.save {
        ensure_saveable(&modified)?;
        let saved = store
            .update(card.id, &modified.front, &modified.back, Some(card.tags.clone()))
            .await;
        if !saved {
            bail!("card {} was not updated", card.id);
        }
        println!("saved");
    }
    Ok(())
}

async fn export_cmd(store: &CardStore, cmd: ExportCmd) -> Result<()> {
    let cards = load(store).await?;
    match cmd {
        ExportCmd::Json { path, filter } => {
            write_json(&path, &select(&cards, &filter))?;
            println!("wrote {}", path.display());
        }
        ExportCmd::Csv { path, filter } => {
            write_csv(&path, &select(&cards, &filter))?;
            println!("wrote {}", path.display());
        }
    }
    Ok(())
}

// ===== Helpers =====
async fn load(store: &CardStore) -> Result<Vec<Card>> {
    store.fetch_all().await;
    if let Some(e) = store.error() {
        bail!(e);
    }
    Ok(store.cards())
}

async fn find(store: &CardStore, id: i64) -> Result<Card> {
    load(store).await?;
    store.get(id).ok_or_else(|| anyhow!("card not found: {id}"))
}

fn ensure_saveable(modified: &Modified) -> Result<()> {
    if !modified.is_complete() {
        bail!("the modified card has an empty side; not saving");
    }
    Ok(())
}

fn select(cards: &[Card], filter: &ListArgs) -> Vec<Card> {
    let tags: TagSelection = filter.tags.iter().cloned().collect();
    let v = filter_by_tags(cards, &tags);
    match &filter.deck {
        Some(deck) => filter_by_deck(&v, deck),
        None => v,
    }
}

fn card_line(c: &Card) -> String {
    let tags = if c.tags.is_empty() { "-".to_string() } else { c.tags.join(";") };
    format!(
        "{}\t{}\t{}\tdeck={}\ttags={}",
        c.id,
        one_line(&c.front),
        one_line(&c.back),
        c.deck_name,
        tags
    )
}

fn one_line(s: &str) -> String {
    s.lines().collect::<Vec<_>>().join(" / ")
}

#[derive(Serialize, Deserialize)]
struct ExportBundle {
    version: u32,
    cards: Vec<Card>,
}

fn write_json(path: &Path, cards: &[Card]) -> Result<()> {
    let bundle = ExportBundle { version: 1, cards: cards.to_vec() };
    std::fs::write(path, serde_json::to_string_pretty(&bundle)?)?;
    Ok(())
}

/// Anki's text importer reads tags as one space-separated field.
fn write_csv(path: &Path, cards: &[Card]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(["front", "back", "deck", "tags"])?;
    for c in cards {
        wtr.write_record([c.front.as_str(), c.back.as_str(), c.deck_name.as_str(), c.tags.join(" ").as_str()])?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cards() -> Vec<Card> {
        vec![
            Card::new(1, "hola", "hello", "Spanish").with_tags(["greeting", "es"]),
            Card::new(2, "merci", "thanks", "French").with_tags(["fr"]),
            Card::new(3, "line one\nline two", "b", "French"),
        ]
    }

    #[test]
    fn select_combines_tags_and_deck() {
        let all = cards();
        let none = ListArgs::default();
        assert_eq!(select(&all, &none).len(), 3);

        let french = ListArgs { tags: vec![], deck: Some("FRENCH".into()) };
        assert_eq!(select(&all, &french).iter().map(|c| c.id).collect::<Vec<_>>(), vec![2, 3]);

        let tagged = ListArgs { tags: vec!["fr".into()], deck: Some("french".into()) };
        assert_eq!(select(&all, &tagged).len(), 1);

        let mismatch = ListArgs { tags: vec!["es".into()], deck: Some("French".into()) };
        assert!(select(&all, &mismatch).is_empty());
    }

    #[test]
    fn modification_with_empty_side_is_not_saved() {
        let blank_back = Modified { front: "Q".into(), back: String::new() };
        assert!(ensure_saveable(&blank_back).is_err());
        assert!(ensure_saveable(&Modified::default()).is_err());

        let full = Modified { front: "Q".into(), back: "A".into() };
        assert!(ensure_saveable(&full).is_ok());
    }

    #[test]
    fn card_line_is_single_line() {
        let all = cards();
        assert_eq!(card_line(&all[0]), "1\thola\thello\tdeck=Spanish\ttags=greeting;es");
        assert_eq!(card_line(&all[2]), "3\tline one / line two\tb\tdeck=French\ttags=-");
    }

    #[test]
    fn exports_round_trip_through_files() {
        let dir = tempfile::tempdir().unwrap();

        let json_path = dir.path().join("cards.json");
        write_json(&json_path, &cards()).unwrap();
        let bundle: ExportBundle =
            serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(bundle.version, 1);
        assert_eq!(bundle.cards, cards());

        let csv_path = dir.path().join("cards.csv");
        write_csv(&csv_path, &cards()).unwrap();
        let mut rdr = csv::Reader::from_path(&csv_path).unwrap();
        let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(&rows[0][3], "greeting es");
        assert_eq!(&rows[2][0], "line one\nline two");
    }
}
