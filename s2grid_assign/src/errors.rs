/*
 * Copyright © 2025, United States Government, as represented by the Administrator of 
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License"); 
 * you may not use this file except in compliance with the License. You may obtain a copy 
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

use thiserror::Error;
use s2grid_common::errors::S2GridCommonError;

pub type Result<T> = std::result::Result<T, S2GridAssignError>;

#[derive(Error,Debug)]
pub enum S2GridAssignError {
    #[error("IO error {0}")]
    IOError( #[from] std::io::Error),

    #[error("GeoJSON error {0}")]
    GeoJsonError( #[from] geojson::Error),

    #[error("JSON error {0}")]
    JsonError( #[from] serde_json::Error),

    #[error("CSV error {0}")]
    CsvError( #[from] csv::Error),

    #[error("config serialize/deserialize RON error {0}")]
    RonSerdeError( #[from] ron::error::SpannedError),

    #[error("{0}")]
    CommonError( #[from] S2GridCommonError),

    #[error("invalid input {0}")]
    InvalidInput(String),

    #[error("invalid geometry {0}")]
    InvalidGeometry(String),

    #[error("inconsistent grid hierarchy {0}")]
    InconsistentHierarchy(String),

    #[error("result cardinality mismatch: {expected} grid cells but {actual} results")]
    CardinalityMismatch { expected: usize, actual: usize },

    #[error("operation failed {0}")]
    OpFailed(String),
}

macro_rules! invalid_input {
    ($fmt:literal $(, $arg:expr )* ) => {
        $crate::errors::S2GridAssignError::InvalidInput( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use invalid_input;

macro_rules! invalid_geometry {
    ($fmt:literal $(, $arg:expr )* ) => {
        $crate::errors::S2GridAssignError::InvalidGeometry( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use invalid_geometry;

macro_rules! inconsistent_hierarchy {
    ($fmt:literal $(, $arg:expr )* ) => {
        $crate::errors::S2GridAssignError::InconsistentHierarchy( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use inconsistent_hierarchy;

macro_rules! op_failed {
    ($fmt:literal $(, $arg:expr )* ) => {
        $crate::errors::S2GridAssignError::OpFailed( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use op_failed;
