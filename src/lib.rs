// Library root
// -----------
// This crate exposes the record core as a library. The binary (`main.rs`)
// wires it to a terminal prompter and runs the interactive menus.
//
// Module responsibilities:
// - `model`: account record types as stored in the records file.
// - `store`: loads and saves the flat JSON records file.
// - `auth`: field validators, signup, login and password hashing.
// - `policy`: the single access check for every record operation.
// - `editor`: append-only edits and the password-free record summary.
// - `records`: record operations that authorize, edit and save in one step.
// - `prompt`: the question/answer boundary the UI implements.
// - `ui`: menu flows and the `dialoguer` prompter.
// - `config` and `error`: path configuration and the error types.
pub mod auth;
pub mod config;
pub mod editor;
pub mod error;
pub mod model;
pub mod policy;
pub mod prompt;
pub mod records;
pub mod store;
pub mod ui;
