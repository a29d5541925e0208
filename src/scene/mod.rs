pub mod animate_element;
pub mod graph;
pub mod object;
