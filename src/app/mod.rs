mod graph_problems_command;
pub(crate) use graph_problems_command::clap_app;
pub(crate) use graph_problems_command::execute;

mod logging;
pub(crate) use logging::init_logging;
