//! Test Infrastructure

pub(crate) mod db;
pub(crate) mod helpers;

pub(crate) use context::TestContext;
pub(crate) use db::TestDb;
