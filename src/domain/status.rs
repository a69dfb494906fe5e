text_enum!(RestaurantStatus, "restaurant status" {
    Active => "active",
    Inactive => "inactive",
});

text_enum!(EmployeeStatus, "employee status" {
    Active => "active",
    Inactive => "inactive",
});

text_enum!(StaffStatus, "staff status" {
    Active => "active",
    Inactive => "inactive",
    OnLeave => "on-leave",
});

text_enum!(Shift, "shift" {
    Morning => "morning",
    Afternoon => "afternoon",
    Night => "night",
    Split => "split",
});

impl Shift {
    // UTC hours each shift is on the floor; split covers both service peaks
    pub fn covers_hour(&self, hour: u32) -> bool {
        match self {
            Shift::Morning => (6..14).contains(&hour),
            Shift::Afternoon => (14..22).contains(&hour),
            Shift::Night => hour >= 22 || hour < 6,
            Shift::Split => (11..15).contains(&hour) || (18..22).contains(&hour)
        }
    }
}

text_enum!(
    /// Shared by tables and chairs
    SeatingStatus, "status" {
        Available => "available",
        Occupied => "occupied",
        Reserved => "reserved",
        Cleaning => "cleaning",
    }
);

text_enum!(OrderStatus, "order status" {
    Active => "active",
    Completed => "completed",
    Cancelled => "cancelled",
    PaymentPending => "payment-pending",
});

text_enum!(OrderItemStatus, "order item status" {
    Pending => "pending",
    Preparing => "preparing",
    Ready => "ready",
    Served => "served",
});

text_enum!(OrderType, "order type" {
    DineIn => "dine-in",
    Takeaway => "takeaway",
    Delivery => "delivery",
    RoomService => "room-service",
});

text_enum!(PaymentMethod, "payment method" {
    Cash => "cash",
    Card => "card",
    Upi => "upi",
    Wallet => "wallet",
    Credit => "credit",
});

text_enum!(MembershipTier, "membership tier" {
    Bronze => "bronze",
    Silver => "silver",
    Gold => "gold",
    Platinum => "platinum",
});

text_enum!(VendorType, "vendor type" {
    Restaurant => "restaurant",
    Hotel => "hotel",
    Cafe => "cafe",
    Bar => "bar",
});

text_enum!(VendorStatus, "vendor status" {
    Active => "active",
    Inactive => "inactive",
    PendingApproval => "pending-approval",
});

text_enum!(NotificationKind, "notification type" {
    Info => "info",
    Success => "success",
    Warning => "warning",
    Error => "error",
});

text_enum!(ExpenseCategory, "expense category" {
    Utilities => "utilities",
    Supplies => "supplies",
    Staff => "staff",
    Marketing => "marketing",
    Maintenance => "maintenance",
    Other => "other",
});

text_enum!(WasteReason, "waste reason" {
    Expired => "expired",
    Damaged => "damaged",
    Overcooked => "overcooked",
    CustomerReturn => "customer-return",
    Other => "other",
});
