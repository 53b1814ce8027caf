/// UI layer: filter panel, top bar, and the three chart renderers.
pub mod charts;
pub mod panels;
