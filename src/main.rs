use hostsman::hosts::HostsError;
use hostsman::platform::WriteError;

fn main() {
    if let Err(e) = hostsman::cli::run() {
        if e.downcast_ref::<WriteError>().is_some_and(WriteError::is_cancelled) {
            eprintln!("Operation cancelled by user");
        } else if let Some(not_found) = e.downcast_ref::<HostsError>() {
            eprintln!("Warning: {not_found}");
        } else {
            eprintln!("Error: {e:#}");
        }
        std::process::exit(1);
    }
}
