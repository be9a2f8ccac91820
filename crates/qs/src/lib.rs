//! qs: Query Syntax
//!
//! A command-line front end for the `qs-query` field query language. It parses queries like
//! `director:"Steven Spielberg" AND (genre:scifi OR genre:horror)` and prints the resulting
//! tree as an outline, JSON, or a canonical query string. It also shows token streams and
//! validates batches of queries.

#![warn(missing_docs)]

pub mod cli;
