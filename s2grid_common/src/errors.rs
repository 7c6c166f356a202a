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

pub type Result<T> = std::result::Result<T, S2GridCommonError>;

#[derive(Error,Debug)]
pub enum S2GridCommonError {
    #[error("IO error {0}")]
    IOError( #[from] std::io::Error),

    #[error("config serialize/deserialize RON error {0}")]
    RonSerdeError( #[from] ron::error::SpannedError),

    #[error("invalid grid id {0}")]
    InvalidGridId(String),

    #[error("coordinate out of range {0}")]
    OutOfRange(String),
}

macro_rules! invalid_grid_id {
    ($fmt:literal $(, $arg:expr )* ) => {
        S2GridCommonError::InvalidGridId( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use invalid_grid_id;

macro_rules! out_of_range {
    ($fmt:literal $(, $arg:expr )* ) => {
        S2GridCommonError::OutOfRange( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use out_of_range;
