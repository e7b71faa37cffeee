use csv::StringRecord;
use hecke_engine::{CompositeFactor, Factor, Generator, Word};
use lazy_static::lazy_static;
use regex::Regex;
use std::error::Error;
use std::io::Read;

pub mod sage;

// A single generator token: "3", "s3" or "s_3".
lazy_static! {
    static ref GENERATOR_TOKEN: Regex =
        Regex::new(r"^(?:s_?)?(?P<id>\d+)$").expect("Invalid generator regex pattern");
    static ref SEPARATOR: Regex = Regex::new(r"[\s,]+").expect("Invalid separator regex pattern");
    static ref DIGITS: Regex = Regex::new(r"^\d+$").expect("Invalid digits regex pattern");
}

/// Parses a generator written as `3`, `s3` or `s_3`.
pub fn parse_generator(text: &str) -> Result<Generator, Box<dyn Error>> {
    let token = text.trim();
    let caps = GENERATOR_TOKEN
        .captures(token)
        .ok_or_else(|| format!("Invalid generator '{}'", text))?;
    let id = caps["id"]
        .parse::<u8>()
        .map_err(|e| format!("Invalid generator '{}': {}", text, e))?;
    if id == 0 {
        return Err(format!("Generator ids start at 1, got '{}'", text).into());
    }
    Ok(Generator(id))
}

/// Parses a word.
///
/// Accepted notations:
/// - digits run together: `1213`
/// - separated ids, optionally in a tuple or list: `1,2,1,3`, `(1, 2, 1, 3)`, `(2,)`
/// - named generators: `s1 s2 s1 s3`
/// - the identity: `e`, `()` or an empty string
pub fn parse_word(text: &str) -> Result<Word, Box<dyn Error>> {
    let body = strip_brackets(text.trim());

    if body.is_empty() || body == "e" {
        return Ok(Word::new());
    }

    if DIGITS.is_match(body) {
        return body
            .chars()
            .map(|c| parse_generator(&c.to_string()))
            .collect();
    }

    SEPARATOR
        .split(body)
        .filter(|token| !token.is_empty())
        .map(parse_generator)
        .collect()
}

fn strip_brackets(text: &str) -> &str {
    let stripped = text
        .strip_prefix('(')
        .and_then(|t| t.strip_suffix(')'))
        .or_else(|| text.strip_prefix('[').and_then(|t| t.strip_suffix(']')));
    stripped.map(str::trim).unwrap_or(text)
}

/// Parses a factor: a composite tag `A`..`F` or a generator.
pub fn parse_factor(text: &str) -> Result<Factor, Box<dyn Error>> {
    let token = text.trim();
    let composite = match token {
        "A" => Some(CompositeFactor::A),
        "B" => Some(CompositeFactor::B),
        "C" => Some(CompositeFactor::C),
        "D" => Some(CompositeFactor::D),
        "E" => Some(CompositeFactor::E),
        "F" => Some(CompositeFactor::F),
        _ => None,
    };
    match composite {
        Some(c) => Ok(Factor::Composite(c)),
        None => Ok(Factor::Generator(parse_generator(token)?)),
    }
}

/// Parses a factor sequence such as `4 A 7 3 6 1`, `[4, A, 7]` or `4A7361`.
pub fn parse_factors(text: &str) -> Result<Vec<Factor>, Box<dyn Error>> {
    let body = strip_brackets(text.trim());
    if SEPARATOR.is_match(body) {
        SEPARATOR
            .split(body)
            .filter(|token| !token.is_empty())
            .map(parse_factor)
            .collect()
    } else {
        body.chars().map(|c| parse_factor(&c.to_string())).collect()
    }
}

/// Parses a CSV record into a product query.
///
/// Expected CSV format: s,w
pub fn parse_record(record: &StringRecord) -> Result<(Generator, Word), Box<dyn Error>> {
    if record.len() < 2 {
        return Err("CSV record must have at least 2 fields: s, w".into());
    }

    let s = record.get(0).ok_or("Missing s field")?;
    let w = record.get(1).ok_or("Missing w field")?;

    Ok((parse_generator(s)?, parse_word(w)?))
}

/// Reads product queries from CSV with an `s,w` header.
pub fn read_queries<R: Read>(reader: R) -> Result<Vec<(Generator, Word)>, Box<dyn Error>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);
    let mut queries = Vec::new();

    for (line, result) in csv_reader.records().enumerate() {
        let record = result?;
        let query = parse_record(&record).map_err(|e| format!("Query row {}: {}", line + 1, e))?;
        queries.push(query);
    }

    Ok(queries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w(ids: &[u8]) -> Word {
        Word::from_ids(ids)
    }

    #[test]
    fn test_parse_generator() {
        assert_eq!(parse_generator("3").unwrap(), Generator(3));
        assert_eq!(parse_generator(" s4 ").unwrap(), Generator(4));
        assert_eq!(parse_generator("s_2").unwrap(), Generator(2));
        assert!(parse_generator("0").is_err());
        assert!(parse_generator("x").is_err());
        assert!(parse_generator("300").is_err());
    }

    #[test]
    fn test_parse_word_notations() {
        let expected = w(&[1, 2, 1, 3]);
        assert_eq!(parse_word("1213").unwrap(), expected);
        assert_eq!(parse_word("1,2,1,3").unwrap(), expected);
        assert_eq!(parse_word("(1, 2, 1, 3)").unwrap(), expected);
        assert_eq!(parse_word("[1, 2, 1, 3]").unwrap(), expected);
        assert_eq!(parse_word("s1 s2 s1 s3").unwrap(), expected);
    }

    #[test]
    fn test_parse_word_short_forms() {
        assert_eq!(parse_word("(2,)").unwrap(), w(&[2]));
        assert_eq!(parse_word("()").unwrap(), Word::new());
        assert_eq!(parse_word("e").unwrap(), Word::new());
        assert_eq!(parse_word("").unwrap(), Word::new());
    }

    #[test]
    fn test_parse_word_rejects_garbage() {
        assert!(parse_word("1,x,2").is_err());
        assert!(parse_word("1203").is_err());
    }

    #[test]
    fn test_parse_factors() {
        let expected = vec![
            Factor::Generator(Generator(4)),
            Factor::Composite(CompositeFactor::A),
            Factor::Generator(Generator(7)),
        ];
        assert_eq!(parse_factors("4 A 7").unwrap(), expected);
        assert_eq!(parse_factors("[4, A, 7]").unwrap(), expected);
        assert_eq!(parse_factors("4A7").unwrap(), expected);
        assert!(parse_factors("4G").is_err());
    }

    #[test]
    fn test_parse_record() {
        let mut record = StringRecord::new();
        record.push_field("1");
        record.push_field("(3,2,1)");

        let (s, word) = parse_record(&record).unwrap();
        assert_eq!(s, Generator(1));
        assert_eq!(word, w(&[3, 2, 1]));
    }

    #[test]
    fn test_read_queries() {
        let data = "s,w\n1,321\n6,\"(4,1,2,1,7,3,6)\"\n";
        let queries = read_queries(data.as_bytes()).unwrap();
        assert_eq!(
            queries,
            vec![
                (Generator(1), w(&[3, 2, 1])),
                (Generator(6), w(&[4, 1, 2, 1, 7, 3, 6])),
            ]
        );
    }

    #[test]
    fn test_read_queries_reports_row() {
        let data = "s,w
1,321
x,12
";
        let err = read_queries(data.as_bytes()).unwrap_err();
        assert!(err.to_string().starts_with("Query row 2"), "{}", err);
        assert!(read_queries("s,w
3
".as_bytes()).is_err());
    }
}
