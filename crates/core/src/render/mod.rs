pub mod traits;

pub mod highcharts;
