//! Size types shared by the control, the engines and the hosts.
//!
//! Hosts speak logical units; engines speak physical pixels. The only bridge
//! between the two is [`LogicalSize::to_physical`].

mod size;

pub use size::{DpiScale, LogicalSize, PhysicalSize};
