/// Shortest run of zero groups worth turning into `::` (RFC 5952 4.2.2).
pub const MIN_ZERO_GROUPS: usize = 2;

/// A run of all-zero 16-bit groups, in bytes from the start of the address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZeroRun {
	pub offset: usize,
	pub len: usize,
}

/// Finds the run of zero groups that canonical text replaces with `::`.
///
/// The longest run wins and the leftmost one wins a tie. Runs shorter than
/// `MIN_ZERO_GROUPS` groups are never reported.
pub fn zeros_to_skip(ip: &[u8; 16]) -> Option<ZeroRun> {
	let mut best: Option<ZeroRun> = None;
	let mut start = 0;
	let mut groups = 0;

	for (i, pair) in ip.chunks_exact(2).enumerate() {
		if pair == [0, 0] {
			if groups == 0 {
				start = i;
			}
			groups += 1;
		} else {
			consider(&mut best, start, groups);
			groups = 0;
		}
	}
	consider(&mut best, start, groups);

	best
}

fn consider(best: &mut Option<ZeroRun>, start: usize, groups: usize) {
	if groups < MIN_ZERO_GROUPS {
		return;
	}
	let len = groups * 2;
	// strictly longer only, so the earlier run keeps a tie
	if best.is_none_or(|b| len > b.len) {
		*best = Some(ZeroRun { offset: start * 2, len });
	}
}
