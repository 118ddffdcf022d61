/// Segment classification and word rounding.
pub mod address_map;


/// General register file.
pub mod register_file;
