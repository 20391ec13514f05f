pub mod schedule;

pub use schedule::{
    fetch_service_detail, fetch_train_list, CallingPoint, Endpoint, LocationDetail, ServiceDetail,
    ServiceSummary, TrainList,
};
