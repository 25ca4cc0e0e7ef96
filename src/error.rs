// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Domain failures surfaced by the library. Command handlers wrap these in
/// `anyhow` with context before printing.
#[derive(Debug, Error)]
pub enum FinanceError {
    #[error("Invalid {field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    #[error("Unsupported statement file '{0}': expected a .csv or .pdf file")]
    UnsupportedFile(String),

    #[error("Statement analysis failed: {0}")]
    Analysis(String),

    #[error("Investment advice failed: {0}")]
    Advice(String),

    #[error("Not logged in; run `pennywise auth login` first")]
    NotAuthenticated,

    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },

    #[error("Operation cancelled")]
    Cancelled,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl FinanceError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        FinanceError::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn not_found(kind: &'static str, id: impl ToString) -> Self {
        FinanceError::NotFound {
            kind,
            id: id.to_string(),
        }
    }
}
