//! Shared helpers for the persistence layer.

pub mod db_error;
