use dumps::{NominalOrders, Norm};

/// How the expected convergence order of a norm relates to the polynomial degree of the method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderOffset {
    /// L²-type norms converge one order above the degree
    L2,
    /// H¹-type (semi)norms lose that extra order
    H1,
}

impl OrderOffset {
    pub const fn apply(self, degree: i32) -> i32 {
        match self {
            Self::L2 => degree + 1,
            Self::H1 => degree,
        }
    }
}

/// Expected convergence orders in space (`h`) and time (`tau`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpectedOrders {
    pub space: i32,
    pub time: i32,
}

impl ExpectedOrders {
    /// `h^3`
    pub fn space_label(&self) -> String {
        format!("h^{}", self.space)
    }

    /// `\tau^2` (or `τ^2` with `tau = "τ"`)
    pub fn time_label(&self, tau: &str) -> String {
        format!("{}^{}", tau, self.time)
    }

    /// `h^3 + \tau^2`
    pub fn combined_label(&self, tau: &str) -> String {
        format!("{} + {}", self.space_label(), self.time_label(tau))
    }
}

/// An error quantity that can be rendered against its reference curves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quantity {
    /// Name used for flags and output files
    pub name: &'static str,
    pub norm: Norm,
    pub offset: OrderOffset,
    /// Whether the additive space-time reference curve is drawn (when `p == q`)
    pub combined: bool,
    /// LaTeX form of the norm
    pub latex: &'static str,
    /// Plain text form of the norm
    pub text: &'static str,
}

/// Every quantity an error report can be rendered for
pub const QUANTITIES: [Quantity; 4] = [
    Quantity {
        name: "l2l2",
        norm: Norm::L2L2,
        offset: OrderOffset::L2,
        combined: true,
        latex: "L^2(L^2)",
        text: "L²(L²)",
    },
    Quantity {
        name: "l2T",
        norm: Norm::L2T,
        offset: OrderOffset::L2,
        combined: true,
        latex: "L^2(T)",
        text: "L²(T)",
    },
    Quantity {
        name: "l2h1",
        norm: Norm::L2H1,
        offset: OrderOffset::H1,
        combined: true,
        latex: "\\sqrt{\\varepsilon}L^2(H^1)",
        text: "√ε L²(H¹)",
    },
    Quantity {
        name: "linfl2",
        norm: Norm::LinfL2,
        offset: OrderOffset::L2,
        combined: true,
        latex: "L^\\infty(L^2)",
        text: "L∞(L²)",
    },
];

impl Quantity {
    pub fn by_name(name: &str) -> Option<&'static Self> {
        QUANTITIES.iter().find(|quantity| quantity.name == name)
    }

    pub fn expected_orders(&self, nominal: NominalOrders) -> ExpectedOrders {
        ExpectedOrders {
            space: self.offset.apply(nominal.p),
            time: self.offset.apply(nominal.q),
        }
    }

    /// Whether the combined reference curve applies for a report with the given degrees
    pub fn includes_combined(&self, nominal: NominalOrders) -> bool {
        self.combined && nominal.are_balanced()
    }

    /// `L²(L²) error vs. DoFs on p = 1 and q = 1`
    pub fn title(&self, nominal: NominalOrders) -> String {
        format!(
            "{} error vs. DoFs on p = {} and q = {}",
            self.text, nominal.p, nominal.q
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn h1_quantities_lose_one_order() {
        let nominal = NominalOrders { p: 2, q: 1 };

        let l2 = Quantity::by_name("l2l2").unwrap().expected_orders(nominal);
        assert_eq!(l2, ExpectedOrders { space: 3, time: 2 });

        let h1 = Quantity::by_name("l2h1").unwrap().expected_orders(nominal);
        assert_eq!(h1, ExpectedOrders { space: 2, time: 1 });
    }

    #[test]
    fn labels() {
        let orders = ExpectedOrders { space: 3, time: 2 };

        assert_eq!(orders.space_label(), "h^3");
        assert_eq!(orders.time_label("\\tau"), "\\tau^2");
        assert_eq!(orders.combined_label("\\tau"), "h^3 + \\tau^2");
        assert_eq!(orders.combined_label("τ"), "h^3 + τ^2");
    }

    #[test]
    fn combined_only_for_balanced_degrees() {
        let quantity = Quantity::by_name("l2T").unwrap();

        assert!(quantity.includes_combined(NominalOrders { p: 1, q: 1 }));
        assert!(!quantity.includes_combined(NominalOrders { p: 2, q: 1 }));
    }

    #[test]
    fn every_norm_has_a_quantity() {
        for norm in Norm::ALL {
            let quantity = QUANTITIES.iter().find(|q| q.norm == norm).unwrap();
            assert_eq!(quantity.name, norm.key());
        }
        assert!(Quantity::by_name("h1").is_none());
    }
}
