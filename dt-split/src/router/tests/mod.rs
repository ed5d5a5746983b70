mod router_test;

use super::*;
