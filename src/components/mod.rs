pub mod search_bar;
pub mod social_graph;
