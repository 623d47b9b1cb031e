//! Carousel card formatting.

use crate::line::{Action, CarouselColumn};
use jikan_catalog::AnimeSummary;

/// Carousel templates hold at most this many columns
pub const MAX_CARDS: usize = 10;
/// Longest title a column may show
pub const MAX_TITLE_CHARS: usize = 40;
const TRUNCATED_TITLE_CHARS: usize = MAX_TITLE_CHARS - ELLIPSIS.len();
const ELLIPSIS: &str = "...";

pub const DETAILS_LABEL: &str = "Details";

/// Display card derived from one [`AnimeSummary`]
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub thumbnail_url: Option<String>,
    pub title: String,
    pub subtitle: String,
    pub action_url: String,
}

impl From<&AnimeSummary> for Card {
    fn from(summary: &AnimeSummary) -> Self {
        Self {
            thumbnail_url: summary.image_url.clone(),
            title: truncate_title(&summary.title),
            subtitle: subtitle(summary.rank, summary.score),
            action_url: summary.url.clone(),
        }
    }
}

impl From<Card> for CarouselColumn {
    fn from(card: Card) -> Self {
        Self {
            thumbnail_image_url: card.thumbnail_url,
            title: card.title,
            text: card.subtitle,
            actions: vec![Action::Uri {
                label: DETAILS_LABEL.to_string(),
                uri: card.action_url,
            }],
        }
    }
}

/// Build at most [`MAX_CARDS`] cards, in input order.
///
/// Every column of a carousel must agree on having a thumbnail, so one
/// missing cover drops them all.
pub fn build_cards(summaries: &[AnimeSummary]) -> Vec<Card> {
    let mut cards: Vec<Card> = summaries.iter().take(MAX_CARDS).map(Card::from).collect();
    if cards.iter().any(|card| card.thumbnail_url.is_none()) {
        for card in &mut cards {
            card.thumbnail_url = None;
        }
    }
    cards
}

/// Titles over 40 characters keep their first 37 plus `...`
pub fn truncate_title(title: &str) -> String {
    if title.chars().count() > MAX_TITLE_CHARS {
        let mut short: String = title.chars().take(TRUNCATED_TITLE_CHARS).collect();
        short.push_str(ELLIPSIS);
        short
    } else {
        title.to_string()
    }
}

pub fn subtitle(rank: Option<u32>, score: Option<f64>) -> String {
    let score = score.map_or_else(|| "N/A".to_string(), |s| s.to_string());
    // Jikan reports unranked entries as 0
    match rank.filter(|&rank| rank > 0) {
        Some(rank) => format!("Rank: #{} - Score: {}", rank, score),
        None => format!("Score: {}", score),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(title: &str, rank: Option<u32>, score: Option<f64>) -> AnimeSummary {
        AnimeSummary {
            title: title.to_string(),
            score,
            rank,
            image_url: Some("https://cdn.myanimelist.net/images/anime/1/1.jpg".to_string()),
            url: "https://myanimelist.net/anime/1".to_string(),
        }
    }

    #[test]
    fn test_card_count_is_bounded() {
        for n in [0, 1, 9, 10, 11, 25] {
            let summaries: Vec<_> = (0..n)
                .map(|i| summary(&"x".repeat(i * 3), Some(i as u32 + 1), Some(7.5)))
                .collect();
            let cards = build_cards(&summaries);

            assert_eq!(cards.len(), n.min(MAX_CARDS));
            assert!(cards.iter().all(|c| c.title.chars().count() <= MAX_TITLE_CHARS));
        }
    }

    #[test]
    fn test_fifty_char_title_is_truncated() {
        let title = "A".repeat(50);
        let short = truncate_title(&title);

        assert_eq!(short.chars().count(), 40);
        assert_eq!(short, format!("{}...", "A".repeat(37)));
    }

    #[test]
    fn test_forty_char_title_is_kept() {
        let title = "B".repeat(40);
        assert_eq!(truncate_title(&title), title);
    }

    #[test]
    fn test_truncation_counts_characters_not_bytes() {
        let title = "進撃の巨人".repeat(10);
        let short = truncate_title(&title);

        assert_eq!(short.chars().count(), 40);
        assert!(short.ends_with("..."));
    }

    #[test]
    fn test_subtitle_with_and_without_rank() {
        assert_eq!(subtitle(Some(1), Some(9.1)), "Rank: #1 - Score: 9.1");
        assert_eq!(subtitle(None, Some(8.0)), "Score: 8");
        assert_eq!(subtitle(None, None), "Score: N/A");
        assert_eq!(subtitle(Some(12), None), "Rank: #12 - Score: N/A");
    }

    #[test]
    fn test_rank_zero_is_unranked() {
        assert_eq!(subtitle(Some(0), Some(7.1)), "Score: 7.1");
        assert_eq!(subtitle(Some(0), None), "Score: N/A");
    }

    #[test]
    fn test_missing_cover_drops_every_thumbnail() {
        let mut no_cover = summary("No Cover", Some(2), Some(8.2));
        no_cover.image_url = None;
        let summaries = vec![summary("With Cover", Some(1), Some(9.0)), no_cover];

        let columns: Vec<CarouselColumn> =
            build_cards(&summaries).into_iter().map(CarouselColumn::from).collect();
        let value = serde_json::to_value(&columns).unwrap();

        assert_eq!(columns.len(), 2);
        for column in value.as_array().unwrap() {
            assert!(column.get("thumbnailImageUrl").is_none());
        }
    }

    #[test]
    fn test_thumbnails_kept_when_every_cover_present() {
        let summaries = vec![
            summary("First", Some(1), Some(9.0)),
            summary("Second", Some(2), Some(8.9)),
        ];
        let cards = build_cards(&summaries);

        assert!(cards.iter().all(|card| card.thumbnail_url.is_some()));
    }

    #[test]
    fn test_column_has_single_details_action() {
        let card = Card::from(&summary("Steins;Gate", Some(3), Some(9.07)));
        let column = CarouselColumn::from(card);

        assert_eq!(column.title, "Steins;Gate");
        assert_eq!(column.text, "Rank: #3 - Score: 9.07");
        assert_eq!(
            column.actions,
            vec![Action::Uri {
                label: "Details".to_string(),
                uri: "https://myanimelist.net/anime/1".to_string(),
            }]
        );
    }
}
