//! Non-interactive input loop for redirected/piped stdin: no echo, no
//! editing, one statement per line. This is what every end-to-end test
//! drives the binary through.

use std::io::{self, BufRead, Write};

pub fn read_line(prompt: &str, input: &mut impl BufRead) -> io::Result<Option<String>> {
    print!("{prompt}");
    io::stdout().flush()?;

    let mut line = String::new();
    let bytes_read = input.read_line(&mut line)?;
    if bytes_read == 0 {
        return Ok(None);
    }
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(Some(line))
}
