mod equivalence_test;
