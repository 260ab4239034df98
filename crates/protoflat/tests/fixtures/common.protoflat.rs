// @generated by protoflat-gen from common.proto. Do not edit.

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Money {
    pub currency: ::std::string::String,
    pub units: i64,
}

impl Money {
    pub const CURRENCY_TAG: ::protoflat::FieldHeader =
        ::protoflat::FieldHeader::new(1, ::protoflat::WireType::LengthDelimited);
    pub const UNITS_TAG: ::protoflat::FieldHeader =
        ::protoflat::FieldHeader::new(2, ::protoflat::WireType::Varint);
}

impl ::protoflat::Message for Money {
    fn size(&self) -> usize {
        0 + ::protoflat::field::size::<::protoflat::LengthDelimited, _>(Self::CURRENCY_TAG, &self.currency)
            + ::protoflat::field::size::<::protoflat::Varint, _>(Self::UNITS_TAG, &self.units)
    }

    fn serialize(&self, buf: &mut ::std::vec::Vec<u8>) {
        ::protoflat::field::serialize::<::protoflat::LengthDelimited, _>(Self::CURRENCY_TAG, &self.currency, buf);
        ::protoflat::field::serialize::<::protoflat::Varint, _>(Self::UNITS_TAG, &self.units, buf);
    }

    fn merge_field(
        &mut self,
        header: ::protoflat::FieldHeader,
        view: &mut ::protoflat::ByteViewer<'_>,
    ) -> ::protoflat::SerDeResult<bool> {
        match header.field_number {
            1 => ::protoflat::field::deserialize::<::protoflat::LengthDelimited, _>(header, Self::CURRENCY_TAG, view, &mut self.currency)
                .map(|()| true),
            2 => ::protoflat::field::deserialize::<::protoflat::Varint, _>(header, Self::UNITS_TAG, view, &mut self.units)
                .map(|()| true),
            _ => ::core::result::Result::Ok(false),
        }
    }

    fn is_default(&self) -> bool {
        true && <::protoflat::LengthDelimited as ::protoflat::TypeCodec<_>>::is_default(&self.currency)
            && <::protoflat::Varint as ::protoflat::TypeCodec<_>>::is_default(&self.units)
    }
}
