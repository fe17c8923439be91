use std::process::ExitCode;

use human_panic::setup_panic;

use proxy_gen::prelude::*;

fn main() -> ExitCode {
    setup_panic!();

    let matches = get_matches();
    match perform_hook_based_on_arguments(&matches) {
        Ok(return_path) => {
            // The archive reads the preview location from stdout
            println!("{}", return_path.display());
            ExitCode::SUCCESS
        }
        Err(_) => ExitCode::FAILURE,
    }
}
