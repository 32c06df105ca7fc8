//! Backward scan recovering the chain expression around a cursor.
//!
//! The scan is a small explicit state machine over the raw bytes: a
//! backward pointer `ps`, a fixed end `pe`, integer nesting counters for
//! balanced parentheses/brackets, and a `prev_is_name` flag that decides
//! whether a call/index group may extend the chain without a `.`/`:`
//! separator. Delimiters inside string literals are not distinguished
//! (known limitation).

/// A name character: ASCII alphanumeric or underscore.
fn is_name_char(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

struct BackScan<'a> {
    bytes: &'a [u8],
    ps: usize,
    /// Cleared whenever a call/index group is consumed; set again when a
    /// name run is. Gates separator-less chain extension.
    prev_is_name: bool,
}

impl BackScan<'_> {
    /// Move left to the start of a contiguous name run.
    fn go_to_name_start(&mut self) {
        while self.ps != 0 && is_name_char(self.bytes[self.ps - 1]) {
            self.ps -= 1;
            self.prev_is_name = true;
        }
    }

    /// Move left past whitespace.
    fn skip_whitespace(&mut self) {
        while self.ps != 0 && self.bytes[self.ps - 1].is_ascii_whitespace() {
            self.ps -= 1;
        }
    }

    /// Move left until the parenthesis matching the group ending just
    /// left of `ps` is found, tracking nesting with a counter.
    fn consume_parens(&mut self) {
        let mut depth = 0i32;
        while self.ps != 0 {
            self.ps -= 1;
            match self.bytes[self.ps] {
                b')' => {
                    depth += 1;
                    self.prev_is_name = false;
                }
                b'(' => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                _ => {}
            }
        }
    }

    /// Same as `consume_parens` for square brackets.
    fn consume_brackets(&mut self) {
        let mut depth = 0i32;
        while self.ps != 0 {
            self.ps -= 1;
            match self.bytes[self.ps] {
                b']' => {
                    depth += 1;
                    self.prev_is_name = false;
                }
                b'[' => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                _ => {}
            }
        }
    }
}

/// Extract the maximal chain-expression substring ending at or around the
/// cursor byte offset. `None` means "end of text". Returns the empty
/// string when the cursor is not adjacent to chain text.
#[must_use]
pub fn extract_variable_at(text: &str, pos: Option<usize>) -> &str {
    if text.is_empty() {
        return "";
    }
    let bytes = text.as_bytes();
    let mut pos = pos.unwrap_or(bytes.len() - 1);
    if pos >= bytes.len() {
        return "";
    }
    let seed = bytes[pos];
    if !(is_name_char(seed) || seed == b')' || seed == b']') {
        return "";
    }

    let mut pe = pos;
    let mut scan = BackScan {
        bytes,
        ps: pos,
        prev_is_name: false,
    };

    if is_name_char(seed) {
        // Extend through the full name run in both directions
        while pe < bytes.len() && is_name_char(bytes[pe]) {
            pe += 1;
        }
        scan.go_to_name_start();
        // No room to the left for a separator: the seed is the whole chain
        if scan.ps < 2 {
            return &text[scan.ps..pe];
        }
    } else if seed == b')' {
        scan.ps = pos + 1;
        pe = pos + 1;
        scan.consume_parens();
        scan.skip_whitespace();
        scan.go_to_name_start();
        pos = scan.ps;
    } else {
        scan.ps = pos + 1;
        pe = pos + 1;
        scan.consume_brackets();
        scan.skip_whitespace();
        scan.go_to_name_start();
        pos = scan.ps;
    }

    // Look at the character left of the segment just consumed and decide
    // whether the chain continues
    while pos > 1 {
        pos = scan.ps;
        scan.skip_whitespace();
        if scan.ps == 0 {
            break;
        }
        let c = scan.bytes[scan.ps - 1];
        if c == b'.' || c == b':' {
            scan.ps -= 1;
            scan.skip_whitespace();
            if scan.ps != 0 && scan.bytes[scan.ps - 1] == b')' {
                scan.consume_parens();
            } else if scan.ps != 0 && scan.bytes[scan.ps - 1] == b']' {
                scan.consume_brackets();
            }
            scan.skip_whitespace();
            scan.go_to_name_start();
            pos = scan.ps;
        } else if !scan.prev_is_name && c == b')' {
            scan.consume_parens();
            scan.skip_whitespace();
            scan.go_to_name_start();
            pos = scan.ps;
        } else if !scan.prev_is_name && c == b']' {
            scan.consume_brackets();
            scan.skip_whitespace();
            scan.go_to_name_start();
            pos = scan.ps;
        } else {
            break;
        }
    }

    &text[pos..pe]
}
