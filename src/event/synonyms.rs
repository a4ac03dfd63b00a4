use std::cmp::Reverse;
use std::sync::LazyLock;

use crate::error::ConfigurationError;

pub const LATEST_SYNONYM_VERSION: &str = "v2";

struct SynonymSet {
    canonical: &'static str,
    synonyms: &'static [&'static str],
}

struct VersionedSynonyms {
    version: &'static str,
    sets: &'static [SynonymSet],
}

const fn set(canonical: &'static str, synonyms: &'static [&'static str]) -> SynonymSet {
    SynonymSet {
        canonical,
        synonyms,
    }
}

// Synonyms start and end on word characters and never occur as whole words
// inside a canonical phrase.
const SYNONYM_VERSIONS: &[VersionedSynonyms] = &[
    VersionedSynonyms {
        version: "v1",
        sets: &[
            set("kill", &["got a kill", "killed it"]),
            set("dig", &["dug", "dug it"]),
            set("hitting error", &["hit error", "attack error", "hit out"]),
        ],
    },
    VersionedSynonyms {
        version: "v2",
        sets: &[
            set(
                "kill",
                &[
                    "got a kill",
                    "killed it",
                    "put it away",
                    "put away",
                    "kill shot",
                    "spike",
                    "spiked it",
                    "slammed it",
                ],
            ),
            set("ace", &["service ace", "served an ace", "ace serve"]),
            set("block", &["stuff block", "stuffed", "roofed", "solo block"]),
            set("dig", &["dug", "dug it", "great dig", "saved it", "pancake"]),
            set("assist", &["set assist", "nice set", "dime"]),
            set("hit attempt", &["attack", "attack attempt", "swing", "swung"]),
            set(
                "hitting error",
                &[
                    "attack error",
                    "hit error",
                    "hit out",
                    "hit it out",
                    "hit into the net",
                    "swing error",
                    "attacked out",
                    "hitting err",
                ],
            ),
            set(
                "serve error",
                &[
                    "service error",
                    "serving error",
                    "missed serve",
                    "served out",
                    "serve out",
                    "served into the net",
                ],
            ),
            set(
                "reception error",
                &[
                    "passing error",
                    "pass error",
                    "receive error",
                    "receiving error",
                    "shanked pass",
                    "shanked",
                    "shank",
                ],
            ),
            set("block error", &["blocking error", "block violation"]),
            set(
                "ball handling error",
                &[
                    "double contact",
                    "double",
                    "lift",
                    "lifted",
                    "carry",
                    "carried",
                ],
            ),
            set(
                "point us",
                &["our point", "point for us", "point to us", "we scored"],
            ),
            set(
                "point them",
                &["their point", "point for them", "point to them", "they scored"],
            ),
        ],
    },
];

struct SynonymRule {
    synonym: &'static str,
    canonical: &'static str,
    pattern: regex::Regex,
}

impl SynonymRule {
    fn compile(synonym: &'static str, canonical: &'static str) -> Self {
        let words: Vec<String> = synonym.split_whitespace().map(regex::escape).collect();
        let pattern = regex::Regex::new(&format!(r"\b{}\b", words.join(r"\s+")))
            .expect("valid synonym regex");
        Self {
            synonym,
            canonical,
            pattern,
        }
    }

    fn split_into(&self, raw: &str, out: &mut Vec<Segment>) {
        let mut last = 0;
        for m in self.pattern.find_iter(raw) {
            if m.start() > last {
                out.push(Segment::Raw(raw[last..m.start()].to_string()));
            }
            out.push(Segment::Canonical(self.canonical));
            last = m.end();
        }
        if last < raw.len() {
            out.push(Segment::Raw(raw[last..].to_string()));
        }
    }
}

/// Working text during normalization. Canonical segments are output of an
/// earlier rule and are never rescanned.
#[derive(Debug)]
enum Segment {
    Raw(String),
    Canonical(&'static str),
}

/// A synonym version flattened into substitution order.
pub struct SynonymTable {
    version: &'static str,
    rules: Vec<SynonymRule>,
}

static COMPILED_TABLES: LazyLock<Vec<SynonymTable>> =
    LazyLock::new(|| SYNONYM_VERSIONS.iter().map(SynonymTable::compile).collect());

impl SynonymTable {
    fn compile(versioned: &VersionedSynonyms) -> Self {
        let mut pairs: Vec<(&'static str, &'static str)> = versioned
            .sets
            .iter()
            .flat_map(|s| s.synonyms.iter().map(move |syn| (*syn, s.canonical)))
            .collect();
        pairs.sort_by_key(|(synonym, canonical)| {
            (Reverse(synonym.chars().count()), *synonym, *canonical)
        });

        Self {
            version: versioned.version,
            rules: pairs
                .into_iter()
                .map(|(synonym, canonical)| SynonymRule::compile(synonym, canonical))
                .collect(),
        }
    }

    pub fn lookup(version: &str) -> Result<&'static SynonymTable, ConfigurationError> {
        COMPILED_TABLES
            .iter()
            .find(|t| t.version == version)
            .ok_or_else(|| ConfigurationError::UnknownSynonymVersion {
                requested: version.to_string(),
                known: synonym_versions().collect(),
            })
    }

    pub fn version(&self) -> &'static str {
        self.version
    }

    /// `(synonym, canonical)` pairs in the order they are applied.
    pub fn pairs(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.rules.iter().map(|r| (r.synonym, r.canonical))
    }

    /// Rewrites synonyms in already trimmed, lower-cased text.
    pub fn apply(&self, cleaned: &str) -> String {
        let mut segments = vec![Segment::Raw(cleaned.to_string())];

        for rule in &self.rules {
            let hit = segments
                .iter()
                .any(|s| matches!(s, Segment::Raw(raw) if rule.pattern.is_match(raw)));
            if !hit {
                continue;
            }

            let mut next = Vec::with_capacity(segments.len() + 2);
            for segment in segments {
                match segment {
                    Segment::Raw(raw) => rule.split_into(&raw, &mut next),
                    canonical => next.push(canonical),
                }
            }
            segments = next;
        }

        let mut out = String::with_capacity(cleaned.len());
        for segment in &segments {
            match segment {
                Segment::Raw(raw) => out.push_str(raw),
                Segment::Canonical(canonical) => out.push_str(canonical),
            }
        }
        out
    }
}

pub fn synonym_versions() -> impl Iterator<Item = &'static str> {
    SYNONYM_VERSIONS.iter().map(|v| v.version)
}

// Unicode whitespace plus the ASCII information separators U+001C..=U+001F.
fn is_strippable(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

/// Trim, lower-case and rewrite `text` with the synonyms of `version`.
pub fn normalize(text: &str, version: &str) -> Result<String, ConfigurationError> {
    let table = SynonymTable::lookup(version)?;
    Ok(table.apply(&text.trim_matches(is_strippable).to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::rules::{EVENT_RULES, lookup};
    use std::collections::HashSet;

    fn norm(text: &str) -> String {
        normalize(text, LATEST_SYNONYM_VERSION).unwrap()
    }

    #[test]
    fn test_trims_and_lowercases() {
        assert_eq!(norm("  12 KILL  "), "12 kill");
        assert_eq!(norm(""), "");
    }

    #[test]
    fn test_multi_word_synonym() {
        assert_eq!(norm("12 got a kill"), "12 kill");
        assert_eq!(norm("Our Point"), "point us");
        assert_eq!(norm("point for them"), "point them");
    }

    #[test]
    fn test_longer_synonym_replaced_before_contained_shorter_one() {
        assert_eq!(norm("10 attack error"), "10 hitting error");
        assert_eq!(norm("10 attack"), "10 hit attempt");
        assert_eq!(norm("4 swing error"), "4 hitting error");
        assert_eq!(norm("8 double contact"), "8 ball handling error");
    }

    #[test]
    fn test_whole_word_only() {
        assert_eq!(norm("5 passing error"), "5 reception error");
        assert_eq!(norm("3 shanks"), "3 shanks");
        assert_eq!(norm("9 doubled"), "9 doubled");
        assert_eq!(norm("spikes"), "spikes");
    }

    #[test]
    fn test_replacement_output_is_not_rescanned() {
        // "shanked pass" yields "reception error"; nothing may rewrite inside it.
        assert_eq!(norm("2 shanked pass"), "2 reception error");
        assert_eq!(norm("7 swing"), "7 hit attempt");
    }

    #[test]
    fn test_every_occurrence_is_replaced() {
        assert_eq!(norm("dug it dug"), "dig dig");
    }

    #[test]
    fn test_flexible_internal_whitespace_in_synonyms() {
        assert_eq!(norm("12 got  a\tkill"), "12 kill");
    }

    #[test]
    fn test_unmatched_whitespace_is_kept() {
        assert_eq!(norm("12   did  something"), "12   did  something");
    }

    #[test]
    fn test_unknown_version_is_configuration_error() {
        let err = normalize("12 kill", "v0").unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::UnknownSynonymVersion {
                requested: "v0".to_string(),
                known: vec!["v1", "v2"],
            }
        );
    }

    #[test]
    fn test_versions_are_pinned() {
        assert_eq!(normalize("4 spike", "v1").unwrap(), "4 spike");
        assert_eq!(normalize("4 spike", "v2").unwrap(), "4 kill");
        assert_eq!(normalize("4 hit out", "v1").unwrap(), "4 hitting error");
    }

    #[test]
    fn test_deterministic() {
        for input in ["12 got a kill", "10 attack error out", "x", "  point to us "] {
            assert_eq!(norm(input), norm(input));
        }
    }

    #[test]
    fn test_canonical_output_without_synonyms_is_stable() {
        let once = norm("swing");
        assert_eq!(once, "hit attempt");
        assert_eq!(norm(&once), once);
    }

    #[test]
    fn test_rules_sorted_longest_first() {
        for version in synonym_versions() {
            let table = SynonymTable::lookup(version).unwrap();
            assert_eq!(table.version(), version);
            let lens: Vec<usize> = table.pairs().map(|(s, _)| s.chars().count()).collect();
            assert!(lens.windows(2).all(|w| w[0] >= w[1]), "{version} not sorted");
        }
    }

    #[test]
    fn test_equal_length_synonyms_sorted_by_text() {
        let table = SynonymTable::lookup("v2").unwrap();
        let nine: Vec<(&str, &str)> = table.pairs().filter(|(s, _)| s.len() == 9).collect();
        assert_eq!(
            nine,
            vec![
                ("ace serve", "ace"),
                ("great dig", "dig"),
                ("hit error", "hitting error"),
                ("kill shot", "kill"),
                ("killed it", "kill"),
                ("our point", "point us"),
                ("serve out", "serve error"),
                ("spiked it", "kill"),
                ("we scored", "point us"),
            ]
        );
    }

    #[test]
    fn test_order_independent_of_declaration_order() {
        const FORWARD: VersionedSynonyms = VersionedSynonyms {
            version: "forward",
            sets: &[set("dig", &["dug", "saved"]), set("kill", &["cut", "spike"])],
        };
        const REVERSED: VersionedSynonyms = VersionedSynonyms {
            version: "reversed",
            sets: &[set("kill", &["spike", "cut"]), set("dig", &["saved", "dug"])],
        };

        let forward: Vec<_> = SynonymTable::compile(&FORWARD).pairs().collect();
        let reversed: Vec<_> = SynonymTable::compile(&REVERSED).pairs().collect();
        assert_eq!(forward, reversed);
        assert_eq!(
            forward,
            vec![("saved", "dig"), ("spike", "kill"), ("cut", "kill"), ("dug", "dig")]
        );
    }

    #[test]
    fn test_strips_information_separators() {
        assert_eq!(norm("\u{1c}point us"), "point us");
        assert_eq!(norm("\u{1f} 12 kill \u{1d}"), "12 kill");
        assert_eq!(norm("\u{a0}dig 4\u{3000}"), "dig 4");
    }

    #[test]
    fn test_tables_are_well_formed() {
        let canonical_phrases: HashSet<&str> = EVENT_RULES.iter().map(|r| r.phrase).collect();

        for versioned in SYNONYM_VERSIONS {
            let mut seen = HashSet::new();
            for s in versioned.sets {
                assert!(lookup(s.canonical).is_some(), "unknown canonical {}", s.canonical);
                for syn in s.synonyms {
                    assert!(seen.insert(*syn), "duplicate synonym {syn}");
                    assert_eq!(*syn, syn.to_lowercase());
                    assert_eq!(*syn, syn.split_whitespace().collect::<Vec<_>>().join(" "));
                    assert!(!canonical_phrases.contains(syn), "{syn} is canonical");

                    let first = syn.chars().next().unwrap();
                    let last = syn.chars().last().unwrap();
                    assert!(first.is_alphanumeric() && last.is_alphanumeric(), "{syn}");

                    let rule = SynonymRule::compile(*syn, s.canonical);
                    for phrase in &canonical_phrases {
                        assert!(!rule.pattern.is_match(phrase), "{syn} occurs in {phrase}");
                    }
                }
            }
        }
    }
}
