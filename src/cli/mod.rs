// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Command-line interface module.

mod args;
mod dispatch;

pub use args::{Cli, Commands, DeployArgs, PlanArgs, PrArgs, VetArgs};
pub use dispatch::run;
