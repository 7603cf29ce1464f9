pub mod force_graph;
pub mod panels;
pub mod query_builder;
