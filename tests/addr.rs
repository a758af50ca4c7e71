use addrfmt::{FromSockAddr, IpAddress, LogConfig, LogIpSwitch, SocketAddrV4, SocketAddrV6,
			  ToSockAddr, ipstr, sensitive_ipstr, str_canonical, str_raw, str_reversed,
			  str_sensitive, zeros_to_skip};
use proptest::prelude::*;

/// Undoes `::` compression and parses the eight groups back.
fn expand(text: &str) -> Vec<u16> {
	let parse = |part: &str| -> Vec<u16> {
		if part.is_empty() {
			return Vec::new();
		}
		part.split(':').map(|g| u16::from_str_radix(g, 16).unwrap()).collect()
	};
	match text.split_once("::") {
		Some((head, tail)) => {
			let tail = parse(tail);
			let mut groups = parse(head);
			groups.resize(8 - tail.len(), 0);
			groups.extend(tail);
			groups
		}
		None => parse(text),
	}
}

#[test]
fn rfc5952_examples() {
	let addr: IpAddress = SocketAddrV6::new(
		[0x20, 0x01, 0, 0, 0, 0, 0, 0, 0, 0x01, 0, 0, 0, 0, 0, 0x01],
		0,
	).into();
	assert_eq!(ipstr(&addr), "2001::1:0:0:1");

	let zero: IpAddress = SocketAddrV6::new([0; 16], 0).into();
	assert_eq!(ipstr(&zero), "::");
}

#[test]
fn port_update_leaves_original_alone() {
	let addr: IpAddress = SocketAddrV4::new([192, 0, 2, 1], 443).into();
	let moved = addr.with_port_host_order(8080);

	assert_eq!(addr.port_host_order(), Ok(443));
	assert_eq!(moved.port_host_order(), Ok(8080));
	assert_eq!(ipstr(&moved), ipstr(&addr));
}

#[test]
fn reverse_names() {
	let v4: IpAddress = SocketAddrV4::new([192, 0, 2, 1], 0).into();
	assert_eq!(str_reversed(Some(&v4)), "1.2.0.192.IN-ADDR.ARPA.");

	let v6: IpAddress = SocketAddrV6::from_segments([0x2001, 0xdb8, 0, 0, 0, 0, 0, 1], 0).into();
	let name = str_reversed(Some(&v6));
	let labels: Vec<&str> = name.strip_suffix("IP6.ARPA.").unwrap().split_terminator('.').collect();
	assert_eq!(labels.len(), 32);
	assert_eq!(&labels[..2], &["1", "0"]);
	assert_eq!(&labels[24..], &["8", "b", "d", "0", "1", "0", "0", "2"]);
}

#[test]
fn process_wide_redaction() {
	static LOG_IP: LogIpSwitch = LogIpSwitch::new(true);
	let addr: IpAddress = SocketAddrV4::new([198, 51, 100, 7], 500).into();

	assert_eq!(sensitive_ipstr(&addr, &LOG_IP), "198.51.100.7");
	LOG_IP.set(false);
	assert_eq!(sensitive_ipstr(&addr, &LOG_IP), "<ip-address>");
	assert_eq!(str_sensitive(None, &LOG_IP), "<none>");
	assert_eq!(format!("{}", addr.display_sensitive(&LOG_IP)), "<ip-address>");
}

#[test]
fn native_round_trip() {
	let addr: IpAddress = SocketAddrV6::with_scope([0xfe, 0x80, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 9], 4500, 2).into();
	let back = addr
		.with_raw(|ptr, len| unsafe { IpAddress::from_sockaddr(ptr, len) })
		.flatten();
	assert_eq!(back, Some(addr));
	assert_eq!(back.map(|a| a.to_string()), Some("fe80::9".to_string()));
}

proptest! {
	#[test]
	fn canonical_ipv6_expands_back(ip in any::<[u8; 16]>()) {
		let addr = SocketAddrV6::new(ip, 0);
		let text = ipstr(&addr.into());

		prop_assert!(text.matches("::").count() <= 1);
		prop_assert!(!text.contains(":::"));
		prop_assert_eq!(expand(&text), addr.segments().to_vec());
	}

	#[test]
	fn raw_ipv6_has_eight_groups(ip in any::<[u8; 16]>()) {
		let addr: IpAddress = SocketAddrV6::new(ip, 0).into();
		let text = str_raw(Some(&addr), None);

		prop_assert_eq!(text.split(':').count(), 8);
		prop_assert!(!text.contains("::"));
	}

	#[test]
	fn ipv4_is_dotted_decimal(ip in any::<[u8; 4]>()) {
		let addr: IpAddress = SocketAddrV4::new(ip, 0).into();
		let canonical = str_canonical(Some(&addr));
		let raw = str_raw(Some(&addr), None);

		prop_assert_eq!(&canonical, &raw);
		let octets: Vec<&str> = canonical.split('.').collect();
		prop_assert_eq!(octets.len(), 4);
		for (text, byte) in octets.iter().zip(ip) {
			prop_assert_eq!(*text, byte.to_string());
		}
	}

	#[test]
	fn zero_run_is_longest_and_leftmost(segments in proptest::array::uniform8(prop_oneof![Just(0u16), any::<u16>()])) {
		let addr = SocketAddrV6::from_segments(segments, 0);
		let run = zeros_to_skip(addr.octets());

		// longest run of zero groups by brute force, leftmost on a tie
		let mut best: Option<(usize, usize)> = None;
		for start in 0..8 {
			let len = segments[start..].iter().take_while(|&&g| g == 0).count();
			if len >= 2 && best.is_none_or(|(_, l)| len > l) {
				best = Some((start, len));
			}
		}

		prop_assert_eq!(run.map(|r| (r.offset / 2, r.len / 2)), best);
		if let Some(r) = run {
			prop_assert!(r.len >= 4 && r.len % 2 == 0);
		}
	}

	#[test]
	fn sensitive_matches_canonical_when_logging(ip in any::<[u8; 16]>()) {
		let addr: IpAddress = SocketAddrV6::new(ip, 0).into();
		let show = LogConfig::new();
		let hide = LogConfig::new().redacted();

		prop_assert_eq!(str_sensitive(Some(&addr), &show), str_canonical(Some(&addr)));
		prop_assert_eq!(str_sensitive(Some(&addr), &hide), "<ip-address>");
		prop_assert_eq!(ipstr(&addr), ipstr(&addr));
	}
}
