use std::sync::atomic::{AtomicBool, Ordering};

/// Decides whether address text may appear in logs.
///
/// Read once per sensitive formatting call.
pub trait PrivacyPolicy {
	/// True when addresses must be replaced by a placeholder.
	fn redact_addresses(&self) -> bool;
}

/// Logging configuration.
#[derive(Debug, Clone, Copy)]
pub struct LogConfig {
	/// Show IP addresses in sensitive log text.
	pub log_ip: bool,
}

impl Default for LogConfig {
	fn default() -> Self {
		Self {
			log_ip: true,
		}
	}
}

impl LogConfig {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn log_ip(mut self, enable: bool) -> Self {
		self.log_ip = enable;
		self
	}

	/// Hide every address behind `<ip-address>`.
	pub fn redacted(mut self) -> Self {
		self.log_ip = false;
		self
	}
}

impl PrivacyPolicy for LogConfig {
	fn redact_addresses(&self) -> bool {
		!self.log_ip
	}
}

/// Process-wide `log_ip` switch.
///
/// Meant for a `static`; reads and writes are single atomic word accesses,
/// so any thread may format while another flips it.
#[derive(Debug)]
pub struct LogIpSwitch(AtomicBool);

impl LogIpSwitch {
	pub const fn new(log_ip: bool) -> Self {
		Self(AtomicBool::new(log_ip))
	}

	pub fn set(&self, log_ip: bool) {
		self.0.store(log_ip, Ordering::Relaxed);
	}

	pub fn get(&self) -> bool {
		self.0.load(Ordering::Relaxed)
	}
}

impl Default for LogIpSwitch {
	fn default() -> Self {
		Self::new(LogConfig::default().log_ip)
	}
}

impl PrivacyPolicy for LogIpSwitch {
	fn redact_addresses(&self) -> bool {
		!self.get()
	}
}

impl<P: PrivacyPolicy + ?Sized> PrivacyPolicy for &P {
	fn redact_addresses(&self) -> bool {
		(**self).redact_addresses()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn config_defaults_to_logging_addresses() {
		assert!(!LogConfig::new().redact_addresses());
		assert!(LogConfig::new().redacted().redact_addresses());
		assert!(LogConfig::new().log_ip(false).redact_addresses());
	}

	#[test]
	fn switch_is_shared() {
		static SWITCH: LogIpSwitch = LogIpSwitch::new(true);
		assert!(!SWITCH.redact_addresses());

		std::thread::spawn(|| SWITCH.set(false)).join().unwrap();
		assert!(SWITCH.redact_addresses());
		assert!((&SWITCH).redact_addresses());
	}
}
