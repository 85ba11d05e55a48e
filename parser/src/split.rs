use memchr::memchr;

/// Splits a byte slice on `sep`, skipping empty pieces, with at most
/// `max_splits` cuts. Empty pieces do not use up a cut. Once the cuts are
/// spent the remainder is yielded as is, separators included.
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    rest: &'a [u8],
    sep: u8,
    splits_left: usize,
}

#[inline]
pub fn segments(input: &[u8], sep: u8, max_splits: usize) -> Segments<'_> {
    return Segments {
        rest: input,
        sep,
        splits_left: max_splits,
    };
}

impl<'a> Iterator for Segments<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<&'a [u8]> {
        if self.splits_left == 0 {
            let rest = std::mem::take(&mut self.rest);
            return if rest.is_empty() { None } else { Some(rest) };
        }
        while let Some((&first, tail)) = self.rest.split_first() {
            if first != self.sep {
                break;
            }
            self.rest = tail;
        }
        if self.rest.is_empty() {
            return None;
        }
        return match memchr(self.sep, self.rest) {
            Some(at) => {
                let piece = &self.rest[..at];
                self.rest = &self.rest[at + 1..];
                self.splits_left -= 1;
                Some(piece)
            }
            None => Some(std::mem::take(&mut self.rest)),
        };
    }
}
