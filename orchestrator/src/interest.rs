// Fixed interest vocabulary used to match activities against trip requests

use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interest {
    History,
    Beer,
    Food,
    Festivals,
    Museums,
    Art,
    Music,
    Nature,
    Nightlife,
    Shopping,
}

// Normalized tag -> category. Multi-word entries are checked before single words.
const SYNONYMS: &[(&str, Interest)] = &[
    ("walking tours", Interest::History),
    ("craft beer", Interest::Beer),
    ("traditional food", Interest::Food),
    ("coffee culture", Interest::Food),
    ("classical music", Interest::Music),
    ("history", Interest::History),
    ("historical", Interest::History),
    ("castles", Interest::History),
    ("beer", Interest::Beer),
    ("brewery", Interest::Beer),
    ("breweries", Interest::Beer),
    ("food", Interest::Food),
    ("cuisine", Interest::Food),
    ("culinary", Interest::Food),
    ("oktoberfest", Interest::Festivals),
    ("festival", Interest::Festivals),
    ("festivals", Interest::Festivals),
    ("museum", Interest::Museums),
    ("museums", Interest::Museums),
    ("art", Interest::Art),
    ("galleries", Interest::Art),
    ("music", Interest::Music),
    ("opera", Interest::Music),
    ("concerts", Interest::Music),
    ("nature", Interest::Nature),
    ("parks", Interest::Nature),
    ("hiking", Interest::Nature),
    ("canals", Interest::Nature),
    ("nightlife", Interest::Nightlife),
    ("bars", Interest::Nightlife),
    ("shopping", Interest::Shopping),
    ("markets", Interest::Shopping),
];

impl Interest {
    /// Map a free-text tag onto the vocabulary, ignoring case and surrounding whitespace.
    pub fn parse(tag: &str) -> Option<Self> {
        let normalized = tag.trim().to_lowercase();
        SYNONYMS
            .iter()
            .find(|(term, _)| *term == normalized)
            .map(|(_, interest)| *interest)
    }

    /// Parse every tag, dropping unknown ones and duplicates while keeping first-seen order.
    pub fn parse_all<S: AsRef<str>>(tags: &[S]) -> Vec<Self> {
        let mut interests = Vec::new();
        for tag in tags {
            match Self::parse(tag.as_ref()) {
                Some(interest) if !interests.contains(&interest) => interests.push(interest),
                Some(_) => {}
                None => warn!("Ignoring unknown interest tag: {}", tag.as_ref()),
            }
        }
        interests
    }

    /// Vocabulary terms mentioned anywhere in free text, in order of appearance.
    pub fn mentioned_in(text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        let mut hits: Vec<(usize, &str)> = Vec::new();
        for (term, _) in SYNONYMS {
            if let Some(pos) = find_word(&lowered, term) {
                // skip terms already covered by a longer phrase at the same spot
                if hits.iter().any(|(p, t)| pos >= *p && pos < p + t.len()) {
                    continue;
                }
                hits.push((pos, *term));
            }
        }
        hits.sort_by_key(|(pos, _)| *pos);
        hits.into_iter().map(|(_, term)| term.to_string()).collect()
    }

    /// True when any of `wanted` appears in `offered`.
    pub fn matches_any(offered: &[Interest], wanted: &[Interest]) -> bool {
        offered.iter().any(|interest| wanted.contains(interest))
    }
}

fn find_word(haystack: &str, needle: &str) -> Option<usize> {
    let is_word = |c: char| c.is_alphanumeric();
    haystack.match_indices(needle).map(|(pos, _)| pos).find(|&pos| {
        let before = haystack[..pos].chars().next_back();
        let after = haystack[pos + needle.len()..].chars().next();
        !before.is_some_and(is_word) && !after.is_some_and(is_word)
    })
}
