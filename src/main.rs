// Copyright 2025 JiangLong.
//
// Licensed under the Apache License, Version 2.0 (the "License");
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

use clap::Parser;
use clientset_wrapgen::cli::{commands::Commands, CliArgs};
use tracing::Level;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    // Initialize tracing; stdout is reserved for command output
    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match args.command {
        Commands::Generate(cmd) => cmd.execute(),
        Commands::Check(cmd) => cmd.execute(),
        Commands::Inspect(cmd) => cmd.execute(),
    }
}
