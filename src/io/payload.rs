// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Coordinate payload parser using pest

use pest::error::LineColLocation;
use pest::Parser;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "io/geo.pest"]
struct PayloadParser;

/// The two coordinate groups of a `(..; ..)` payload
#[derive(Debug, Clone, PartialEq)]
pub struct TuplePair {
    pub first: Vec<f64>,
    pub second: Vec<f64>,
}

/// Parse the first bracketed tuple pair in `text`.
///
/// Anything before the opening bracket and after the closing one is ignored.
/// Errors are returned as a short human-readable reason.
pub fn parse_tuple_pair(text: &str) -> Result<TuplePair, String> {
    let start = text
        .find('(')
        .ok_or_else(|| "missing '(' before coordinates".to_string())?;
    let source = &text[start..];

    let mut pairs = PayloadParser::parse(Rule::tuple_pair, source).map_err(|e| {
        let column = match e.line_col {
            LineColLocation::Pos((_, col)) | LineColLocation::Span((_, col), _) => col,
        };
        format!("unexpected input at column {}", start + column)
    })?;

    let tuple = pairs
        .next()
        .ok_or_else(|| "empty coordinate payload".to_string())?;

    let mut groups = Vec::with_capacity(2);
    for coords in tuple.into_inner() {
        let values = coords
            .into_inner()
            .map(|number| {
                number
                    .as_str()
                    .parse::<f64>()
                    .map_err(|e| format!("bad number {:?}: {}", number.as_str(), e))
            })
            .collect::<Result<Vec<_>, _>>()?;
        groups.push(values);
    }

    let second = groups.pop().unwrap_or_default();
    let first = groups.pop().unwrap_or_default();
    Ok(TuplePair { first, second })
}

/// Parse a payload that must hold exactly three numbers per group
pub fn parse_triple_pair(text: &str) -> Result<([f64; 3], [f64; 3]), String> {
    let pair = parse_tuple_pair(text)?;
    let to_triple = |values: &[f64], which: &str| -> Result<[f64; 3], String> {
        <[f64; 3]>::try_from(values)
            .map_err(|_| format!("{} group has {} coordinates, expected 3", which, values.len()))
    };
    Ok((
        to_triple(&pair.first, "first")?,
        to_triple(&pair.second, "second")?,
    ))
}
