// Copyright  (C) 2020, Hove and/or its affiliates. All rights reserved.
//
// This file is part of Navitia,
// the software to build cool stuff with public transport.
//
// Hope you'll enjoy and contribute to this project,
// powered by Hove (www.kisio.com).
// Help us simplify mobility and open public transport:
// a non ending quest to the responsive locomotion way of traveling!
//
// This contribution is a part of the research and development work of the
// IVA Project which aims to enhance traveler information and is carried out
// under the leadership of the Technological Research Institute SystemX,
// with the partnership and support of the transport organization authority
// Ile-De-France Mobilités (IDFM), SNCF, and public funds
// under the scope of the French Program "Investissements d’Avenir".
//
// LICENCE: This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.
//
// Stay tuned using
// twitter @navitia
// channel `#navitia` on riot https://riot.im/app/#/room/#navitia:matrix.org
// https://groups.google.com/d/forum/navitia
// www.navitia.io

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Error};
use structopt::StructOpt;

use munin::tracing::error;
use munin_cli::{logger, run};

#[derive(StructOpt)]
#[structopt(
    name = "munin_cli",
    about = "Answer transit catalogue queries from a json document.",
    rename_all = "snake_case"
)]
struct Options {
    /// path of the input document; reads standard input when absent
    #[structopt(parse(from_os_str))]
    input: Option<PathBuf>,
}

fn main() {
    logger::init_logger();
    let options = Options::from_args();
    if let Err(err) = run_batch(&options) {
        error!("{:?}", err);
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }
}

fn run_batch(options: &Options) -> Result<(), Error> {
    let input = match &options.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Could not read the input document {:?}", path))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Could not read standard input")?;
            buffer
        }
    };
    let output = run(&input)?;
    println!("{}", output);
    Ok(())
}
