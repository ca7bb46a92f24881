//! Cambridge English-Polish dictionary scraper.

use regex::Regex;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use vocab_core::dictionary::MAX_EXAMPLES;
use vocab_core::{Dictionary, DictionaryEntry, LookupError};

pub const DEFAULT_DICTIONARY_URL: &str =
    "https://dictionary.cambridge.org/dictionary/english-polish/";

const USER_AGENT: &str = "Mozilla/5.0";

/// Extracts dictionary data from an entry page.
#[derive(Debug, Clone)]
pub struct EntryScraper {
    translation: Regex,
    definition: Regex,
    example: Regex,
    tag: Regex,
}

impl EntryScraper {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            translation: Regex::new(
                r#"(?s)<span[^>]*class="[^"]*\bdtrans-se\b[^"]*"[^>]*>(.*?)</span>"#,
            )?,
            definition: Regex::new(r#"(?s)<div[^>]*class="[^"]*\bdb\b[^"]*"[^>]*>(.*?)</div>"#)?,
            example: Regex::new(r#"(?s)<div[^>]*class="[^"]*\bdexamp\b[^"]*"[^>]*>(.*?)</div>"#)?,
            tag: Regex::new(r"<[^>]+>")?,
        })
    }

    /// Parse an entry page. The page must hold at least one translation.
    pub fn parse(&self, html: &str) -> Result<DictionaryEntry, LookupError> {
        let translations = self
            .translation
            .captures(html)
            .map(|c| self.text(&c[1]))
            .ok_or_else(|| LookupError::Parse("no translation on the page".to_string()))?;
        let translations: Vec<String> = translations
            .split([',', ';'])
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();
        if translations.is_empty() {
            return Err(LookupError::Parse("empty translation".to_string()));
        }

        let definition = self
            .definition
            .captures(html)
            .map(|c| self.text(&c[1]))
            .unwrap_or_default();

        let examples = self
            .example
            .captures_iter(html)
            .map(|c| self.text(&c[1]))
            .filter(|e| !e.is_empty())
            .take(MAX_EXAMPLES)
            .collect();

        Ok(DictionaryEntry {
            translations,
            definition,
            examples,
        })
    }

    fn text(&self, fragment: &str) -> String {
        let stripped = self.tag.replace_all(fragment, "");
        let decoded = html_escape::decode_html_entities(&stripped);
        decoded.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

/// Looks words up on the Cambridge dictionary website.
pub struct CambridgeDictionary {
    client: Client,
    base_url: String,
    scraper: EntryScraper,
}

impl CambridgeDictionary {
    pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            scraper: EntryScraper::new()?,
        })
    }

    fn fetch(&self, word: &str) -> Result<String, LookupError> {
        let url = format!("{}{}", self.base_url, word);
        tracing::debug!(%url, "fetching dictionary entry");

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| LookupError::Network(e.to_string()))?;

        match response.status() {
            StatusCode::NOT_FOUND => return Err(LookupError::NotFound(word.to_string())),
            status if !status.is_success() => {
                return Err(LookupError::Network(format!("server responded with {status}")))
            }
            _ => {}
        }

        response
            .text()
            .map_err(|e| LookupError::Network(e.to_string()))
    }
}

impl Dictionary for CambridgeDictionary {
    fn lookup(&self, word: &str) -> Result<DictionaryEntry, LookupError> {
        let page = self.fetch(word)?;
        let entry = self.scraper.parse(&page).map_err(|e| match e {
            // Unknown words redirect to the search page, which has no entry
            LookupError::Parse(_) => LookupError::NotFound(word.to_string()),
            other => other,
        })?;
        tracing::info!(
            word,
            translations = entry.translations.len(),
            examples = entry.examples.len(),
            "dictionary entry found"
        );
        Ok(entry)
    }
}
