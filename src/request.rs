//! Request field sub-parser: `METHOD RESOURCE PROTOCOL`.

/// Parts of the quoted request field. Any part may be missing.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ParsedRequest<'a> {
    pub method: Option<&'a [u8]>,
    pub resource: Option<&'a [u8]>,
    pub protocol: Option<&'a [u8]>,
}

impl<'a> ParsedRequest<'a> {
    /// Split on whitespace into at most three parts, extra parts are ignored.
    pub fn parse(request: &'a [u8]) -> Self {
        let mut parts = request
            .split(|b| b.is_ascii_whitespace())
            .filter(|part| !part.is_empty());

        Self {
            method: parts.next(),
            resource: parts.next(),
            protocol: parts.next(),
        }
    }
}
