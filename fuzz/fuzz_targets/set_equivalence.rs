#![no_main]
use libfuzzer_sys::fuzz_target;

use boxed_avl::model::{run_set_equivalence, SetOp};

fuzz_target!(|ops: Vec<SetOp>| { run_set_equivalence(ops) });
