use convcom::cli::{report_error, run};

fn main() {
    if let Err(error) = run() {
        report_error(&error);
        std::process::exit(1);
    }
}
