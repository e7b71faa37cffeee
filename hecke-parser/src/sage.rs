//! Reader for answers printed by a Sage session: Laurent polynomials in `v`
//! and dictionaries from word tuples to coefficients.

use crate::{parse_generator, parse_word};
use hecke_engine::{Generator, Laurent, LinearCombination, RecordedOracle, Word};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use std::error::Error;
use std::io::Read;

// Terms of a Laurent polynomial after normalization (no whitespace, `**` as
// `^`, negative exponents marked with `~` so that `-` only separates terms).
// Matches:
// - "3", "-2"
// - "v", "2*v", "-v^2", "v^~1"
// - "1/v", "2/v^3"
lazy_static! {
    static ref TERM: Regex = Regex::new(r"[+-]?[^+-]+").expect("Invalid term regex pattern");
    static ref CONSTANT: Regex =
        Regex::new(r"^(?P<sign>[+-]?)(?P<coef>\d+)$").expect("Invalid constant regex pattern");
    static ref POWER: Regex = Regex::new(
        r"^(?P<sign>[+-]?)(?:(?P<coef>\d+)\*?)?v(?:\^(?P<exp>~?\d+))?$"
    )
    .expect("Invalid power regex pattern");
    static ref INVERSE: Regex = Regex::new(
        r"^(?P<sign>[+-]?)(?P<coef>\d+)/v(?:\^(?P<exp>\d+))?$"
    )
    .expect("Invalid inverse regex pattern");
    static ref PAREN_EXPONENT: Regex =
        Regex::new(r"\^\((?P<exp>-?\d+)\)").expect("Invalid exponent regex pattern");
    // One dictionary entry: "(1, 2): v + v^-1". Coefficients never contain
    // commas or braces.
    static ref ENTRY: Regex = Regex::new(
        r"\((?P<word>[\d,\s]*)\)\s*:\s*(?P<coef>[^,}]+)"
    )
    .expect("Invalid dictionary entry regex pattern");
}

/// Parses a Laurent polynomial such as `v + v^-1`, `v + 1/v`, `-2*v^(-1)` or
/// `v**2 - 1`.
pub fn parse_laurent(text: &str) -> Result<Laurent, Box<dyn Error>> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    let compact = compact.replace("**", "^");
    let compact = PAREN_EXPONENT.replace_all(&compact, "^$exp").into_owned();
    let compact = compact.replace("^-", "^~");

    if compact.is_empty() {
        return Err("Empty polynomial".into());
    }

    let mut total = Laurent::default();
    let mut consumed = 0;
    for m in TERM.find_iter(&compact) {
        if m.start() != consumed {
            return Err(format!("Invalid polynomial '{}'", text).into());
        }
        consumed = m.end();
        total += parse_term(m.as_str())
            .map_err(|e| format!("Invalid polynomial '{}': {}", text, e))?;
    }
    if consumed != compact.len() {
        return Err(format!("Invalid polynomial '{}'", text).into());
    }

    Ok(total)
}

fn sign(text: &str) -> i64 {
    if text == "-" {
        -1
    } else {
        1
    }
}

fn coefficient(m: Option<regex::Match<'_>>) -> Result<i64, Box<dyn Error>> {
    match m {
        Some(c) => Ok(c.as_str().parse::<i64>()?),
        None => Ok(1),
    }
}

fn parse_term(term: &str) -> Result<Laurent, Box<dyn Error>> {
    if let Some(caps) = CONSTANT.captures(term) {
        let c = caps["coef"].parse::<i64>()?;
        return Ok(Laurent::constant(sign(&caps["sign"]) * c));
    }

    if let Some(caps) = POWER.captures(term) {
        let c = coefficient(caps.name("coef"))?;
        let exponent = match caps.name("exp") {
            Some(e) => match e.as_str().strip_prefix('~') {
                Some(negative) => -negative.parse::<i32>()?,
                None => e.as_str().parse::<i32>()?,
            },
            None => 1,
        };
        return Ok(Laurent::monomial(sign(&caps["sign"]) * c, exponent));
    }

    if let Some(caps) = INVERSE.captures(term) {
        let c = coefficient(caps.name("coef"))?;
        let exponent = match caps.name("exp") {
            Some(e) => -e.as_str().parse::<i32>()?,
            None => -1,
        };
        return Ok(Laurent::monomial(sign(&caps["sign"]) * c, exponent));
    }

    Err(format!("unrecognized term '{}'", term).into())
}

/// Parses a printed dictionary from word tuples to coefficients, for example
/// `{(1, 2): 1, (2,): v + v^-1}`. A `defaultdict(...)` wrapper is accepted.
pub fn parse_combination(text: &str) -> Result<LinearCombination, Box<dyn Error>> {
    let start = text
        .find('{')
        .ok_or_else(|| format!("Expected a dictionary, got '{}'", text))?;
    let end = text
        .rfind('}')
        .filter(|&end| end > start)
        .ok_or_else(|| format!("Unterminated dictionary '{}'", text))?;
    let body = &text[start + 1..end];

    let mut combination = LinearCombination::new();
    for caps in ENTRY.captures_iter(body) {
        let word = parse_word(&caps["word"])?;
        let coefficient = parse_laurent(&caps["coef"])?;
        combination.add_term(word, coefficient);
    }

    if combination.is_empty() && !body.trim().is_empty() && !ENTRY.is_match(body) {
        return Err(format!("No entries found in '{}'", text).into());
    }

    Ok(combination)
}

/// One recorded answer `c_s * c_w = expected` for a Coxeter system named by
/// its Cartan type.
#[derive(Debug, Deserialize)]
pub struct OracleRow {
    #[serde(rename = "type")]
    pub cartan: String,
    pub s: String,
    pub w: String,
    pub expected: String,
}

/// Parses an oracle row into its Cartan type, query and answer.
pub fn parse_oracle_row(
    row: &OracleRow,
) -> Result<(String, Generator, Word, LinearCombination), Box<dyn Error>> {
    Ok((
        row.cartan.trim().to_string(),
        parse_generator(&row.s)?,
        parse_word(&row.w)?,
        parse_combination(&row.expected)?,
    ))
}

/// Loads recorded answers from CSV with a `type,s,w,expected` header.
pub fn load_oracle<R: Read>(reader: R) -> Result<RecordedOracle, Box<dyn Error>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut oracle = RecordedOracle::new();

    for (line, result) in csv_reader.deserialize::<OracleRow>().enumerate() {
        let row = result.map_err(|e| format!("Oracle row {}: {}", line + 1, e))?;
        let (cartan, s, w, expected) =
            parse_oracle_row(&row).map_err(|e| format!("Oracle row {}: {}", line + 1, e))?;
        oracle.record_product(&cartan, s, &w, expected);
    }

    Ok(oracle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hecke_engine::MultiplicationOracle;

    fn w(ids: &[u8]) -> Word {
        Word::from_ids(ids)
    }

    #[test]
    fn test_parse_laurent_forms() {
        let expected = Laurent::v_plus_v_inv();
        assert_eq!(parse_laurent("v + v^-1").unwrap(), expected);
        assert_eq!(parse_laurent("v + 1/v").unwrap(), expected);
        assert_eq!(parse_laurent("v^(-1) + v").unwrap(), expected);
        assert_eq!(parse_laurent("v**-1 + v").unwrap(), expected);
    }

    #[test]
    fn test_parse_laurent_constants_and_coefficients() {
        assert_eq!(parse_laurent("-2").unwrap(), Laurent::constant(-2));
        assert_eq!(parse_laurent("1").unwrap(), Laurent::constant(1));
        assert_eq!(
            parse_laurent("3*v^2 - v^-1").unwrap(),
            Laurent::monomial(3, 2) + Laurent::monomial(-1, -1)
        );
        assert_eq!(parse_laurent("-2/v^3").unwrap(), Laurent::monomial(-2, -3));
        assert_eq!(parse_laurent("v - v").unwrap(), Laurent::constant(0));
    }

    #[test]
    fn test_parse_laurent_rejects_garbage() {
        assert!(parse_laurent("").is_err());
        assert!(parse_laurent("q + 1").is_err());
        assert!(parse_laurent("v^").is_err());
    }

    #[test]
    fn test_parse_laurent_display_round_trip() {
        let p = Laurent::monomial(3, 2) + Laurent::monomial(-1, -1) + Laurent::constant(-4);
        assert_eq!(parse_laurent(&p.to_string()).unwrap(), p);
    }

    #[test]
    fn test_parse_combination() {
        let lc = parse_combination("{(1, 2): 1, (2,): v + v^-1}").unwrap();
        assert_eq!(lc.len(), 2);
        assert_eq!(lc.coefficient(&w(&[1, 2])), Laurent::constant(1));
        assert_eq!(lc.coefficient(&w(&[2])), Laurent::v_plus_v_inv());
    }

    #[test]
    fn test_parse_combination_defaultdict_and_empty() {
        let printed = "defaultdict(<class 'int'>, {(1, 3, 2, 1): 1, (1, 3): 1})";
        let lc = parse_combination(printed).unwrap();
        assert_eq!(lc.len(), 2);
        assert!(parse_combination("{}").unwrap().is_empty());
        assert!(parse_combination("(1, 2): 1").is_err());
    }

    #[test]
    fn test_load_oracle() {
        let data = "type,s,w,expected\n\
                    B4,1,\"(3,2,1)\",\"{(1,3,2,1): 1, (1,3): 1}\"\n\
                    B4,2,12,\"{(2,1,2): 1, (2,): 1}\"\n";
        let oracle = load_oracle(data.as_bytes()).unwrap();
        assert_eq!(oracle.product_queries("B4").len(), 2);

        let answer = oracle.multiply("B4", Generator(2), &w(&[1, 2])).unwrap();
        assert_eq!(answer.coefficient(&w(&[2, 1, 2])), Laurent::constant(1));
    }

    #[test]
    fn test_load_oracle_reports_bad_row() {
        let data = "type,s,w,expected\nB4,x,12,\"{}\"\n";
        let err = load_oracle(data.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("row 1"));
    }
}
