pub mod address_editor;
pub mod address_map;
pub mod dashboard;
pub mod map_canvas;
pub mod nurse_card;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use address_editor::{AddressEditor, AddressEditorProps};
pub use address_map::{AddressMap, AddressMapProps};
pub use dashboard::{Dashboard, DashboardProps};
pub use map_canvas::{MapCanvas, MapCanvasProps};
pub use nurse_card::{NurseCard, NurseCardProps};
