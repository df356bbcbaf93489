mod host_object_test;
mod scenario_test;
mod semantics_test;
