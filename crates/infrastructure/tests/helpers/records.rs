use hickory_proto::op::Query;
use hickory_proto::rr::rdata::{A, CNAME, TXT};
use hickory_proto::rr::{Name, RData, Record, RecordType};
use std::str::FromStr;

pub fn name(text: &str) -> Name {
    Name::from_str(text).unwrap()
}

pub fn a_record(owner: &str, ip: &str) -> Record {
    Record::from_rdata(name(owner), 300, RData::A(A(ip.parse().unwrap())))
}

pub fn cname_record(owner: &str, target: &str) -> Record {
    Record::from_rdata(name(owner), 300, RData::CNAME(CNAME(name(target))))
}

pub fn txt_record(owner: &str, text: &str) -> Record {
    Record::from_rdata(name(owner), 300, RData::TXT(TXT::new(vec![text.to_string()])))
}

pub fn question(owner: &str, record_type: RecordType) -> Query {
    Query::query(name(owner), record_type)
}
