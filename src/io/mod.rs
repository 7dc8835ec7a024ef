// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! I/O module - classifying, parsing and importing `.geo` documents

mod importer;
mod lexer;
mod parser;
mod payload;

pub use importer::import_geo_file;
pub use lexer::{classify, LineKind};
pub use parser::{
    parse_geo, plane_from_clause, Cell, GeoDocument, GeoParser, RawSolid,
    UnterminatedSolidPolicy,
};
pub use payload::{parse_triple_pair, parse_tuple_pair, TuplePair};
