// @generated by protoflat-gen from sample.proto. Do not edit.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(i32)]
pub enum Status {
    #[default]
    Pending = 0,
    Shipped = 1,
    Lost = -1,
}

impl ::protoflat::Enumeration for Status {
    fn from_i32(value: i32) -> ::core::option::Option<Self> {
        match value {
            0 => ::core::option::Option::Some(Self::Pending),
            1 => ::core::option::Option::Some(Self::Shipped),
            -1 => ::core::option::Option::Some(Self::Lost),
            _ => ::core::option::Option::None,
        }
    }

    fn as_str_name(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Shipped => "SHIPPED",
            Self::Lost => "LOST",
        }
    }
}

impl ::core::convert::From<Status> for i32 {
    fn from(value: Status) -> i32 {
        value as i32
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Sample {
    pub id: i32,
    pub text: ::std::string::String,
    pub data: ::std::vec::Vec<i32>,
    pub messages: ::std::vec::Vec<::std::string::String>,
}

impl Sample {
    pub const ID_TAG: ::protoflat::FieldHeader =
        ::protoflat::FieldHeader::new(1, ::protoflat::WireType::Varint);
    pub const TEXT_TAG: ::protoflat::FieldHeader =
        ::protoflat::FieldHeader::new(2, ::protoflat::WireType::LengthDelimited);
    pub const DATA_TAG: ::protoflat::FieldHeader =
        ::protoflat::FieldHeader::new(3, ::protoflat::WireType::LengthDelimited);
    pub const MESSAGES_TAG: ::protoflat::FieldHeader =
        ::protoflat::FieldHeader::new(4, ::protoflat::WireType::LengthDelimited);
}

impl ::protoflat::Message for Sample {
    fn size(&self) -> usize {
        0 + ::protoflat::field::size::<::protoflat::Varint, _>(Self::ID_TAG, &self.id)
            + ::protoflat::field::size::<::protoflat::LengthDelimited, _>(Self::TEXT_TAG, &self.text)
            + ::protoflat::field::size_packed::<::protoflat::Zigzag, _>(Self::DATA_TAG, &self.data)
            + ::protoflat::field::size_repeated::<::protoflat::LengthDelimited, _>(Self::MESSAGES_TAG, &self.messages)
    }

    fn serialize(&self, buf: &mut ::std::vec::Vec<u8>) {
        ::protoflat::field::serialize::<::protoflat::Varint, _>(Self::ID_TAG, &self.id, buf);
        ::protoflat::field::serialize::<::protoflat::LengthDelimited, _>(Self::TEXT_TAG, &self.text, buf);
        ::protoflat::field::serialize_packed::<::protoflat::Zigzag, _>(Self::DATA_TAG, &self.data, buf);
        ::protoflat::field::serialize_repeated::<::protoflat::LengthDelimited, _>(Self::MESSAGES_TAG, &self.messages, buf);
    }

    fn merge_field(
        &mut self,
        header: ::protoflat::FieldHeader,
        view: &mut ::protoflat::ByteViewer<'_>,
    ) -> ::protoflat::SerDeResult<bool> {
        match header.field_number {
            1 => ::protoflat::field::deserialize::<::protoflat::Varint, _>(header, Self::ID_TAG, view, &mut self.id)
                .map(|()| true),
            2 => ::protoflat::field::deserialize::<::protoflat::LengthDelimited, _>(header, Self::TEXT_TAG, view, &mut self.text)
                .map(|()| true),
            3 => ::protoflat::field::deserialize_scalars::<::protoflat::Zigzag, _>(header, Self::DATA_TAG, view, &mut self.data)
                .map(|()| true),
            4 => ::protoflat::field::deserialize_repeated::<::protoflat::LengthDelimited, _>(header, Self::MESSAGES_TAG, view, &mut self.messages)
                .map(|()| true),
            _ => ::core::result::Result::Ok(false),
        }
    }

    fn is_default(&self) -> bool {
        true && <::protoflat::Varint as ::protoflat::TypeCodec<_>>::is_default(&self.id)
            && <::protoflat::LengthDelimited as ::protoflat::TypeCodec<_>>::is_default(&self.text)
            && self.data.is_empty()
            && self.messages.is_empty()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Order {
    pub id: u64,
    pub status: i32,
    pub lines: ::std::vec::Vec<order::Line>,
    pub price: super::common::Money,
    pub extra: ::core::option::Option<order::Extra>,
}

impl Order {
    pub const ID_TAG: ::protoflat::FieldHeader =
        ::protoflat::FieldHeader::new(1, ::protoflat::WireType::Varint);
    pub const STATUS_TAG: ::protoflat::FieldHeader =
        ::protoflat::FieldHeader::new(2, ::protoflat::WireType::Varint);
    pub const LINES_TAG: ::protoflat::FieldHeader =
        ::protoflat::FieldHeader::new(3, ::protoflat::WireType::LengthDelimited);
    pub const PRICE_TAG: ::protoflat::FieldHeader =
        ::protoflat::FieldHeader::new(4, ::protoflat::WireType::LengthDelimited);

    pub fn status(&self) -> Status {
        <Status as ::protoflat::Enumeration>::from_i32(self.status).unwrap_or_default()
    }

    pub fn set_status(&mut self, value: Status) {
        self.status = ::core::convert::Into::into(value);
    }
}

impl ::protoflat::Message for Order {
    fn size(&self) -> usize {
        0 + ::protoflat::field::size::<::protoflat::Varint, _>(Self::ID_TAG, &self.id)
            + ::protoflat::field::size::<::protoflat::Varint, _>(Self::STATUS_TAG, &self.status)
            + ::protoflat::field::size_repeated::<::protoflat::Nested, _>(Self::LINES_TAG, &self.lines)
            + ::protoflat::field::size::<::protoflat::Nested, _>(Self::PRICE_TAG, &self.price)
            + self.extra.as_ref().map_or(0, <order::Extra as ::protoflat::Oneof>::size)
    }

    fn serialize(&self, buf: &mut ::std::vec::Vec<u8>) {
        ::protoflat::field::serialize::<::protoflat::Varint, _>(Self::ID_TAG, &self.id, buf);
        ::protoflat::field::serialize::<::protoflat::Varint, _>(Self::STATUS_TAG, &self.status, buf);
        ::protoflat::field::serialize_repeated::<::protoflat::Nested, _>(Self::LINES_TAG, &self.lines, buf);
        ::protoflat::field::serialize::<::protoflat::Nested, _>(Self::PRICE_TAG, &self.price, buf);
        if let ::core::option::Option::Some(value) = &self.extra {
            <order::Extra as ::protoflat::Oneof>::serialize(value, buf);
        }
    }

    fn merge_field(
        &mut self,
        header: ::protoflat::FieldHeader,
        view: &mut ::protoflat::ByteViewer<'_>,
    ) -> ::protoflat::SerDeResult<bool> {
        match header.field_number {
            1 => ::protoflat::field::deserialize::<::protoflat::Varint, _>(header, Self::ID_TAG, view, &mut self.id)
                .map(|()| true),
            2 => ::protoflat::field::deserialize::<::protoflat::Varint, _>(header, Self::STATUS_TAG, view, &mut self.status)
                .map(|()| true),
            3 => ::protoflat::field::deserialize_repeated::<::protoflat::Nested, _>(header, Self::LINES_TAG, view, &mut self.lines)
                .map(|()| true),
            4 => ::protoflat::field::deserialize::<::protoflat::Nested, _>(header, Self::PRICE_TAG, view, &mut self.price)
                .map(|()| true),
            5 | 6 => <order::Extra as ::protoflat::Oneof>::merge(&mut self.extra, header, view),
            _ => ::core::result::Result::Ok(false),
        }
    }

    fn is_default(&self) -> bool {
        true && <::protoflat::Varint as ::protoflat::TypeCodec<_>>::is_default(&self.id)
            && <::protoflat::Varint as ::protoflat::TypeCodec<_>>::is_default(&self.status)
            && self.lines.is_empty()
            && <::protoflat::Nested as ::protoflat::TypeCodec<_>>::is_default(&self.price)
            && self.extra.is_none()
    }
}

const _: () = ::core::assert!(
    ::protoflat::tags_match(&[5, 6], <order::Extra as ::protoflat::Oneof>::TAGS),
    "sample.Order.extra: tags do not match the oneof enum"
);

pub mod order {
    #[derive(Clone, Debug, Default, PartialEq)]
    pub struct Line {
        pub sku: ::std::string::String,
        pub quantity: u32,
    }

    impl Line {
        pub const SKU_TAG: ::protoflat::FieldHeader =
            ::protoflat::FieldHeader::new(1, ::protoflat::WireType::LengthDelimited);
        pub const QUANTITY_TAG: ::protoflat::FieldHeader =
            ::protoflat::FieldHeader::new(2, ::protoflat::WireType::Varint);
    }

    impl ::protoflat::Message for Line {
        fn size(&self) -> usize {
            0 + ::protoflat::field::size::<::protoflat::LengthDelimited, _>(Self::SKU_TAG, &self.sku)
                + ::protoflat::field::size::<::protoflat::Varint, _>(Self::QUANTITY_TAG, &self.quantity)
        }

        fn serialize(&self, buf: &mut ::std::vec::Vec<u8>) {
            ::protoflat::field::serialize::<::protoflat::LengthDelimited, _>(Self::SKU_TAG, &self.sku, buf);
            ::protoflat::field::serialize::<::protoflat::Varint, _>(Self::QUANTITY_TAG, &self.quantity, buf);
        }

        fn merge_field(
            &mut self,
            header: ::protoflat::FieldHeader,
            view: &mut ::protoflat::ByteViewer<'_>,
        ) -> ::protoflat::SerDeResult<bool> {
            match header.field_number {
                1 => ::protoflat::field::deserialize::<::protoflat::LengthDelimited, _>(header, Self::SKU_TAG, view, &mut self.sku)
                    .map(|()| true),
                2 => ::protoflat::field::deserialize::<::protoflat::Varint, _>(header, Self::QUANTITY_TAG, view, &mut self.quantity)
                    .map(|()| true),
                _ => ::core::result::Result::Ok(false),
            }
        }

        fn is_default(&self) -> bool {
            true && <::protoflat::LengthDelimited as ::protoflat::TypeCodec<_>>::is_default(&self.sku)
                && <::protoflat::Varint as ::protoflat::TypeCodec<_>>::is_default(&self.quantity)
        }
    }

    #[derive(Clone, Debug, PartialEq)]
    pub enum Extra {
        Note(::std::string::String),
        Gift(Line),
    }

    impl Extra {
        pub const NOTE_TAG: ::protoflat::FieldHeader =
            ::protoflat::FieldHeader::new(5, ::protoflat::WireType::LengthDelimited);
        pub const GIFT_TAG: ::protoflat::FieldHeader =
            ::protoflat::FieldHeader::new(6, ::protoflat::WireType::LengthDelimited);
    }

    impl ::protoflat::Oneof for Extra {
        const TAGS: &'static [u32] = &[5, 6];

        fn size(&self) -> usize {
            match self {
                Self::Note(value) => ::protoflat::field::size_explicit::<::protoflat::LengthDelimited, _>(Self::NOTE_TAG, value),
                Self::Gift(value) => ::protoflat::field::size_explicit::<::protoflat::Nested, _>(Self::GIFT_TAG, value),
            }
        }

        fn serialize(&self, buf: &mut ::std::vec::Vec<u8>) {
            match self {
                Self::Note(value) => ::protoflat::field::serialize_explicit::<::protoflat::LengthDelimited, _>(Self::NOTE_TAG, value, buf),
                Self::Gift(value) => ::protoflat::field::serialize_explicit::<::protoflat::Nested, _>(Self::GIFT_TAG, value, buf),
            }
        }

        fn merge(
            field: &mut ::core::option::Option<Self>,
            header: ::protoflat::FieldHeader,
            view: &mut ::protoflat::ByteViewer<'_>,
        ) -> ::protoflat::SerDeResult<bool> {
            match header.field_number {
                5 => {
                    ::protoflat::field::check_wire_type(header, Self::NOTE_TAG)?;
                    match field {
                        ::core::option::Option::Some(Self::Note(value)) => {
                            <::protoflat::LengthDelimited as ::protoflat::TypeCodec<::std::string::String>>::deserialize(view, value)?
                        }
                        _ => {
                            let mut value = <::std::string::String as ::core::default::Default>::default();
                            <::protoflat::LengthDelimited as ::protoflat::TypeCodec<::std::string::String>>::deserialize(view, &mut value)?;
                            *field = ::core::option::Option::Some(Self::Note(value));
                        }
                    }
                    ::core::result::Result::Ok(true)
                }
                6 => {
                    ::protoflat::field::check_wire_type(header, Self::GIFT_TAG)?;
                    match field {
                        ::core::option::Option::Some(Self::Gift(value)) => {
                            <::protoflat::Nested as ::protoflat::TypeCodec<Line>>::deserialize(view, value)?
                        }
                        _ => {
                            let mut value = <Line as ::core::default::Default>::default();
                            <::protoflat::Nested as ::protoflat::TypeCodec<Line>>::deserialize(view, &mut value)?;
                            *field = ::core::option::Option::Some(Self::Gift(value));
                        }
                    }
                    ::core::result::Result::Ok(true)
                }
                _ => ::core::result::Result::Ok(false),
            }
        }
    }
}
