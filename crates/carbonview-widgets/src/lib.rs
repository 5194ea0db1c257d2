//! Widget implementations for the Carbonview dashboard framework.

pub mod category_list;
pub mod chart;
pub mod modal;
pub mod toast;
pub mod toggle;
pub mod tooltip;
pub mod treemap;

pub use category_list::{CategoryList, CategoryRow, RowClicked, RowExited, RowHovered};
pub use chart::{Axis, AxisSide, Chart, ChartType, DataSeries, LegendPosition};
pub use modal::{CloseReason, Modal, ModalClosed, ModalSize};
pub use toast::{Toast, ToastExpired, ToastKind};
pub use toggle::{ToggleChanged, ToggleGroup, ToggleOption};
pub use tooltip::{Tooltip, TooltipPlacement};
pub use treemap::{CellClicked, CellExited, CellHovered, Treemap};
