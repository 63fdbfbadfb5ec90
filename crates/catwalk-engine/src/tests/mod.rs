mod helpers;
mod mysql_tests;
