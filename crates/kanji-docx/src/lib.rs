mod table;

pub use table::DocxTable;
