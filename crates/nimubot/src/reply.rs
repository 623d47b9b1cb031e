//! Reply assembly for each conversation branch.
//!
//! Every function returns the complete, ordered message list for one reply.
//! Deciding which variant to send is the router's job.

use crate::carousel::Card;
use crate::line::{CarouselColumn, Message, Template};
use jikan_catalog::TopList;

/// LINE emoji shown next to the user's name
const WAVE: char = '\u{100084}';

pub const NOT_FOUND_STICKER_PACKAGE: &str = "11537";
pub const NOT_FOUND_STICKER_ID: &str = "52002770";

pub const PROFILE_UNAVAILABLE: &str = "Bot can't use profile API without user ID";

const INTRO: &str = "Nimobot disini. Nimubot akan membantumu untuk mendapatkan informasi Anime yang kamu inginkan. Silahkan ketikkan judul Anime yang ingin kamu cari..";

const MENU: &str = "menu dibawah ini untuk menampilkan daftar Anime (Ketik 1/2/3/4/5):\n1. Top Anime Airing\n2. Top Anime Movies\n3. Top Upcoming Anime\n4. Top Anime by Popularity\n5. Top Favorited Anime";

const SEARCH_ALT_TEXT: &str = "Search Anime Carousel";

/// Menu reminder following a greeting
pub fn menu_prompt() -> String {
    format!("Atau kamu bisa memilih {}", MENU)
}

/// Menu reminder on its own
pub fn menu_reminder() -> String {
    format!("Kamu bisa memilih {}", MENU)
}

/// Header line above a top-list carousel
pub fn top_list_header(list: TopList) -> &'static str {
    match list {
        TopList::Airing => "#Top Airing Anime",
        TopList::Movies => "#Top Anime Movies",
        TopList::Upcoming => "#Top Upcoming Anime",
        TopList::ByPopularity => "#Top Anime By Popularity",
        TopList::Favorited => "#Top Favorited Anime",
    }
}

/// Notification text for a top-list carousel
pub fn top_list_alt_text(list: TopList) -> &'static str {
    match list {
        TopList::Airing => "Top Airing Anime Carousel",
        TopList::Movies => "Top Anime Movies Carousel",
        TopList::Upcoming => "Top Upcoming Anime Carousel",
        TopList::ByPopularity => "Top Anime By Popularity Carousel",
        TopList::Favorited => "Top Favorite Anime Carousel",
    }
}

/// Answer to `hello` when the sender's profile is known
pub fn greeting(display_name: &str) -> Vec<Message> {
    vec![
        Message::text(format!("Hello {} {}, {}", display_name, WAVE, INTRO)),
        Message::text(menu_prompt()),
    ]
}

/// Answer to `hello` when the event carries no user id
pub fn profile_unavailable() -> Vec<Message> {
    vec![Message::text(PROFILE_UNAVAILABLE)]
}

/// Welcome sent when a user adds the bot
pub fn welcome(display_name: &str) -> Vec<Message> {
    vec![
        Message::text(format!("Hello, {} {}. {}", display_name, WAVE, INTRO)),
        Message::text(menu_prompt()),
    ]
}

pub fn carousel(alt_text: &str, cards: Vec<Card>) -> Message {
    Message::Template {
        alt_text: alt_text.to_string(),
        template: Template::Carousel {
            columns: cards.into_iter().map(CarouselColumn::from).collect(),
        },
    }
}

/// Header plus carousel for a ranked list
pub fn top_list_results(list: TopList, cards: Vec<Card>) -> Vec<Message> {
    vec![
        Message::text(top_list_header(list)),
        carousel(top_list_alt_text(list), cards),
    ]
}

/// Apology when a ranked list could not be fetched
pub fn top_list_unavailable(list: TopList) -> Vec<Message> {
    let label = top_list_header(list).trim_start_matches('#');
    vec![
        Message::text(format!(
            "Maaf, daftar {} sedang tidak dapat ditampilkan. Silahkan coba lagi nanti.",
            label
        )),
        Message::text(menu_reminder()),
    ]
}

/// Header plus carousel for a title search; `query` is the user's own text
pub fn search_results(query: &str, cards: Vec<Card>) -> Vec<Message> {
    vec![
        Message::text(format!("#Search Results: \"{}\"", query)),
        carousel(SEARCH_ALT_TEXT, cards),
    ]
}

/// Not-found text, sticker, and the menu reminder
pub fn not_found(query: &str) -> Vec<Message> {
    vec![
        Message::text(format!("Judul Anime \"{}\" tidak ditemukan!", query)),
        Message::Sticker {
            package_id: NOT_FOUND_STICKER_PACKAGE.to_string(),
            sticker_id: NOT_FOUND_STICKER_ID.to_string(),
        },
        Message::text(menu_reminder()),
    ]
}
