mod addr;
mod error;
pub mod text;

pub use self::error::AddrError;
pub use self::addr::{Family, IpAddress, SockAddr, SocketAddrV4, SocketAddrV6,
					 ToSockAddr, FromSockAddr};
pub use self::text::{write_raw, write_canonical, write_sensitive, write_reversed,
					 str_raw, str_canonical, str_sensitive, str_reversed,
					 ipstr, sensitive_ipstr,
					 AddressStr, ReversedStr, ADDRESS_STR_LEN, REVERSED_STR_LEN,
					 LogConfig, LogIpSwitch, PrivacyPolicy,
					 ZeroRun, zeros_to_skip};
