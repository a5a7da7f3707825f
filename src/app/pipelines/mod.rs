pub mod graph_pipeline;
