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

use tf_provider::{Diagnostics, Value};

use crate::registry::Registry;
use crate::resolver::resolve;
use crate::utils::WithNormalize;

use super::FlatParameters;

impl WithNormalize for FlatParameters {
    fn normalize(&mut self, registry: &Registry, _diags: &mut Diagnostics) {
        self.source_type = match resolve(registry, self) {
            Ok(handler) => Value::Value(handler.schema_tag().to_owned()),
            Err(_) => Value::Unknown,
        };
    }
}
