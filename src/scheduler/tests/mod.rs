mod scheduler_test;
