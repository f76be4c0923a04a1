use hickory_proto::op::Query;
use hickory_proto::rr::rdata::{A, AAAA, CNAME, TXT};
use hickory_proto::rr::{DNSClass, Name, RData, Record, RecordType};
use std::str::FromStr;

pub fn name(fqdn: &str) -> Name {
    Name::from_str(fqdn).unwrap()
}

pub fn a_record(owner: &str, ip: &str) -> Record {
    Record::from_rdata(name(owner), 300, RData::A(A(ip.parse().unwrap())))
}

pub fn aaaa_record(owner: &str, ip: &str) -> Record {
    Record::from_rdata(name(owner), 300, RData::AAAA(AAAA(ip.parse().unwrap())))
}

pub fn cname_record(owner: &str, target: &str) -> Record {
    Record::from_rdata(name(owner), 300, RData::CNAME(CNAME(name(target))))
}

pub fn txt_record(owner: &str, text: &str) -> Record {
    Record::from_rdata(
        name(owner),
        300,
        RData::TXT(TXT::new(vec![text.to_string()])),
    )
}

pub fn with_class(mut record: Record, class: DNSClass) -> Record {
    record.set_dns_class(class);
    record
}

pub fn question(fqdn: &str, record_type: RecordType) -> Query {
    Query::query(name(fqdn), record_type)
}

pub fn question_in_class(fqdn: &str, record_type: RecordType, class: DNSClass) -> Query {
    let mut query = question(fqdn, record_type);
    query.set_query_class(class);
    query
}
