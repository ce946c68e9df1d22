pub mod epworth;
pub mod meq;
pub mod psqi;
pub mod stop_bang;
