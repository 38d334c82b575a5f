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

//! Parameters of the data-quality sources managed by the provider
//!
//! Each source type is a [`Variant`] registered in a [`Registry`]. The registry
//! discriminates `oneOf` payloads coming from the API, and the handlers turn the
//! flat Terraform container back into a tagged payload.

pub mod decoder;
pub mod enums;
pub mod error;
pub mod handler;
pub mod parameters;
pub mod planner;
pub mod registry;
pub mod resolver;
pub mod source;
pub mod utils;
pub mod variant;
pub mod variants;

pub use error::{Error, Result};
pub use handler::{SourceHandler, VariantHandler};
pub use parameters::{FlatParameters, ParametersDto, SourceParameters};
pub use registry::{Registry, DEFAULT_REGISTRY};
pub use source::{CreateSourceDto, Source, SourceDto, UpdateSourceDto};
pub use variant::Variant;
