// This file is part of the terraform-provider-sources project
//
// Copyright (C) ANEO, 2024-2024. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License")
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Error taxonomy of the parameter mapping layer

use thiserror::Error;
use tf_provider::{AttributePath, Diagnostics};

use crate::utils::DisplayJoinable;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Tag is not in the registry
    #[error("unsupported source type: {tag}")]
    UnsupportedType { tag: String },

    /// Discrimination or resolution found a number of candidates other than one
    #[error("{}", describe_ambiguity(.count, .tags))]
    Ambiguous { count: usize, tags: Vec<String> },

    /// Candidate matched the tag but failed field validation
    #[error("cannot parse parameters for type {tag}: {reason}")]
    MalformedShape { tag: String, reason: String },

    /// Unrecognized enum string
    #[error("invalid value {value:?} for {field}, expected one of: {expected}")]
    InvalidEnum {
        field: &'static str,
        value: String,
        expected: String,
    },

    /// Caller broke a precondition of the core
    #[error("{message}. This is a bug in the provider, please report it")]
    ContractViolation { message: String },

    /// Value only known after apply
    #[error("{what} is not known yet")]
    NotKnown { what: String },

    /// Registry configuration problem
    #[error("invalid registry: {message}")]
    Registry { message: String },

    /// An item of a paginated response failed to decode
    #[error("item {index} of the page: {source}")]
    PageItem {
        index: usize,
        #[source]
        source: Box<Error>,
    },

    /// Raw payload is not even valid JSON
    #[error("invalid JSON payload: {message}")]
    Json { message: String },
}

fn describe_ambiguity(count: &usize, tags: &[String]) -> String {
    if *count == 0 {
        "data matches no known shape".to_owned()
    } else {
        format!(
            "data matches more than one shape ({count} matches: {})",
            tags.iter().join_with(", ")
        )
    }
}

impl Error {
    pub fn unsupported(tag: impl Into<String>) -> Self {
        Self::UnsupportedType { tag: tag.into() }
    }

    pub fn ambiguous(tags: Vec<String>) -> Self {
        Self::Ambiguous {
            count: tags.len(),
            tags,
        }
    }

    pub fn malformed(tag: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedShape {
            tag: tag.into(),
            reason: reason.into(),
        }
    }

    pub fn contract(message: impl Into<String>) -> Self {
        Self::ContractViolation {
            message: message.into(),
        }
    }

    /// Whether the error comes from a provider bug rather than from user input
    pub fn is_internal(&self) -> bool {
        match self {
            Self::ContractViolation { .. } | Self::Registry { .. } => true,
            Self::PageItem { source, .. } => source.is_internal(),
            _ => false,
        }
    }

    /// Short summary used as the diagnostic title
    pub fn summary(&self) -> &'static str {
        match self {
            Self::UnsupportedType { .. } => "Unsupported source type",
            Self::Ambiguous { .. } => "Ambiguous source parameters",
            Self::MalformedShape { .. } => "Malformed source parameters",
            Self::InvalidEnum { .. } => "Invalid enum value",
            Self::ContractViolation { .. } => "Internal provider error",
            Self::NotKnown { .. } => "Value not known yet",
            Self::Registry { .. } => "Invalid provider configuration",
            Self::PageItem { source, .. } => source.summary(),
            Self::Json { .. } => "Invalid API response",
        }
    }

    /// Report the error into Terraform diagnostics
    pub fn report(&self, diags: &mut Diagnostics, attr_path: AttributePath) {
        diags.error(self.summary(), self.to_string(), attr_path);
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Self::Json {
            message: value.to_string(),
        }
    }
}
