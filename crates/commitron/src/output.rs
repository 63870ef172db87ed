//! Output of the result envelope.

use std::io::{self, Write};

use commitron_core::response::Response;

/// Print the envelope as one JSON line on stdout.
pub fn output_response(response: &Response) {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    // Ignore broken pipe errors (e.g., piped to `head`)
    let _ = writeln!(handle, "{}", response.to_json());
}
