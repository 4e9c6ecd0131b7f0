//! Token parsers for delimited staged fields
//!
//! Keywords are `;` separated, citations are one per line, and author data
//! is spread over several `;` lists aligned by position.

/// Keywords of a `;` separated list, each trimmed
///
/// Empty elements between separators are kept; callers decide from the whole
/// field whether a keyword block exists at all.
///
/// ```
/// use folio::core::tokens::keywords;
///
/// let parsed: Vec<&str> = keywords("a; b ;c").collect();
/// assert_eq!(parsed, vec!["a", "b", "c"]);
/// ```
pub fn keywords(input: &str) -> impl Iterator<Item = &str> + Clone + '_ {
    input.split(';').map(str::trim)
}

/// Citations, one per line (`\n` or `\r\n`), trimmed, blank lines dropped
pub fn citations(input: &str) -> impl Iterator<Item = &str> + Clone + '_ {
    input.lines().map(str::trim).filter(|s| !s.is_empty())
}

/// One author assembled from the aligned lists
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedAuthor<'a> {
    pub given_name: &'a str,
    pub family_name: &'a str,
    pub email: &'a str,
    pub affiliation: &'a str,
    pub orcid: &'a str,
    pub country: &'a str,
}

/// Raw author columns of a staged row
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthorColumns<'a> {
    pub names: &'a str,
    pub emails: &'a str,
    pub affiliations: &'a str,
    pub orcids: &'a str,
    pub countries: &'a str,
}

/// Splits a name into (given, family)
///
/// `Family, Given` is honoured; otherwise the last word is the family name.
/// A single word is treated as a given name.
pub fn split_name(name: &str) -> (&str, &str) {
    let name = name.trim();
    if let Some((family, given)) = name.split_once(',') {
        return (given.trim(), family.trim());
    }
    match name.rsplit_once(char::is_whitespace) {
        Some((given, family)) => (given.trim(), family.trim()),
        None => (name, ""),
    }
}

fn nth_field(list: &str, index: usize) -> &str {
    list.split(';').nth(index).map(str::trim).unwrap_or("")
}

/// Parses the author lists into authors, in order
///
/// Blank name entries are dropped together with their aligned values; a
/// shorter aligned list yields empty values for the trailing authors.
pub fn parse_authors(columns: AuthorColumns<'_>) -> Vec<ParsedAuthor<'_>> {
    columns
        .names
        .split(';')
        .enumerate()
        .filter(|(_, name)| !name.trim().is_empty())
        .map(|(i, name)| {
            let (given_name, family_name) = split_name(name);
            ParsedAuthor {
                given_name,
                family_name,
                email: nth_field(columns.emails, i),
                affiliation: nth_field(columns.affiliations, i),
                orcid: nth_field(columns.orcids, i),
                country: nth_field(columns.countries, i),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("a; b ;c", &["a", "b", "c"] ; "mixed spacing")]
    #[test_case(" ; ;", &["", "", ""] ; "only separators")]
    #[test_case("single", &["single"] ; "single keyword")]
    #[test_case("x;;y", &["x", "", "y"] ; "empty middle token")]
    #[test_case("a; ;b", &["a", "", "b"] ; "blank middle token")]
    #[test_case("", &[""] ; "empty field")]
    fn test_keywords(input: &str, expected: &[&str]) {
        let parsed: Vec<&str> = keywords(input).collect();
        assert_eq!(parsed, expected);
    }

    #[test]
    fn test_keywords_restartable() {
        let iter = keywords("a;b");
        assert_eq!(iter.clone().count(), 2);
        assert_eq!(iter.collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test_case("Smith 2020\nJones 2019\n", &["Smith 2020", "Jones 2019"] ; "trailing newline")]
    #[test_case("Smith 2020\r\n\r\nJones 2019", &["Smith 2020", "Jones 2019"] ; "crlf with blank")]
    #[test_case("", &[] ; "empty")]
    fn test_citations(input: &str, expected: &[&str]) {
        let parsed: Vec<&str> = citations(input).collect();
        assert_eq!(parsed, expected);
    }

    #[test_case("Jane Doe", "Jane", "Doe" ; "given family")]
    #[test_case("Doe, Jane", "Jane", "Doe" ; "family comma given")]
    #[test_case("Mary Ann  Smith", "Mary Ann", "Smith" ; "multi word given")]
    #[test_case("Plato", "Plato", "" ; "single name")]
    fn test_split_name(input: &str, given: &str, family: &str) {
        assert_eq!(split_name(input), (given, family));
    }

    #[test]
    fn test_parse_authors_aligned() {
        let authors = parse_authors(AuthorColumns {
            names: "Jane Doe; John Roe",
            emails: "jane@example.org;john@example.org",
            affiliations: "Uni A; Uni B",
            orcids: ";0000-0002-1825-0097",
            countries: "CA",
        });

        assert_eq!(authors.len(), 2);
        assert_eq!(authors[0].given_name, "Jane");
        assert_eq!(authors[0].email, "jane@example.org");
        assert_eq!(authors[0].orcid, "");
        assert_eq!(authors[0].country, "CA");
        assert_eq!(authors[1].family_name, "Roe");
        assert_eq!(authors[1].affiliation, "Uni B");
        assert_eq!(authors[1].orcid, "0000-0002-1825-0097");
        assert_eq!(authors[1].country, "");
    }

    #[test]
    fn test_parse_authors_drops_blank_names_with_their_values() {
        let authors = parse_authors(AuthorColumns {
            names: "Jane Doe;;John Roe;",
            emails: "a@x;b@x;c@x",
            ..Default::default()
        });

        assert_eq!(authors.len(), 2);
        assert_eq!(authors[1].email, "c@x");
    }

    #[test]
    fn test_parse_authors_empty() {
        assert!(parse_authors(AuthorColumns::default()).is_empty());
    }
}
