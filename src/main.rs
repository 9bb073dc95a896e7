//! rbooking main entrypoint.

use rbooking::run;
use rbooking::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {e}"));
        std::process::exit(1);
    }
}
